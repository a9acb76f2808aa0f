use chrono::NaiveDate;

use crate::post::{Author, ContentType, Post, Sector};
use crate::text_utils::slugify;

/// Posts installed into a fresh store on first boot, so the site never
/// starts out empty. Ids stay small and stable so links survive reseeding.
pub fn starter_posts() -> Vec<Post> {
    vec![
        seed_post(
            "1",
            "Zero Trust Architecture in Healthcare: Protecting Patient Data",
            "How implementing zero trust architecture can safeguard sensitive patient information in modern healthcare environments.",
            ZERO_TRUST_BODY,
            Sector::Healthcare,
            ContentType::Blog,
            "Dr. Sarah Chen",
            (2025, 4, 1),
            8,
            true,
        ),
        seed_post(
            "2",
            "Blockchain for Supply Chain Transparency: Beyond the Hype",
            "Real-world applications of blockchain technology that are transforming supply chain security and traceability.",
            BLOCKCHAIN_BODY,
            Sector::SupplyChain,
            ContentType::Insight,
            "Marcus Johnson",
            (2025, 3, 28),
            10,
            false,
        ),
        seed_post(
            "3",
            "Securing Smart Buildings: Cybersecurity Challenges in Commercial Real Estate",
            "As buildings become smarter, the attack surface expands. Learn how to protect interconnected building systems.",
            SMART_BUILDINGS_BODY,
            Sector::RealEstate,
            ContentType::Blog,
            "Alisha Patel",
            (2025, 3, 25),
            7,
            false,
        ),
        seed_post(
            "4",
            "AI-Powered Fraud Detection in Financial Services: A Case Study",
            "How a leading financial institution leveraged machine learning to reduce fraud by 87% while improving customer experience.",
            FRAUD_DETECTION_BODY,
            Sector::Finance,
            ContentType::CaseStudy,
            "Robert Zhang",
            (2025, 3, 20),
            12,
            true,
        ),
        seed_post(
            "5",
            "Medical Device Security: Addressing Vulnerabilities in Connected Healthcare",
            "Critical security considerations for the growing ecosystem of connected medical devices.",
            MEDICAL_DEVICES_BODY,
            Sector::Healthcare,
            ContentType::Insight,
            "Dr. James Wilson",
            (2025, 3, 15),
            9,
            false,
        ),
    ]
}

fn seed_post(
    id: &str,
    title: &str,
    excerpt: &str,
    content: &str,
    sector: Sector,
    content_type: ContentType,
    author: &str,
    published: (i32, u32, u32),
    read_time: u32,
    featured: bool,
) -> Post {
    let (year, month, day) = published;
    let published_date = NaiveDate::from_ymd_opt(year, month, day).unwrap();

    Post {
        id: id.to_string(),
        title: title.to_string(),
        slug: slugify(title),
        excerpt: excerpt.to_string(),
        content: content.to_string(),
        sector,
        content_type,
        author: Author {
            name: author.to_string(),
            avatar: "/placeholder.svg".to_string(),
        },
        published_date,
        read_time,
        image_url: "/placeholder.svg".to_string(),
        featured,
        created_at: published_date.and_hms_opt(0, 0, 0).unwrap().and_utc(),
    }
}

const ZERO_TRUST_BODY: &str = r#"In today's healthcare landscape, protecting sensitive patient data has become more challenging than ever. With the increasing number of connected devices and the shift to cloud-based solutions, traditional security perimeters are no longer sufficient.

## Never trust, always verify

Zero Trust Architecture (ZTA) offers a modern approach to security by operating on the principle of "never trust, always verify." This means that no device, user, or application is trusted by default, regardless of whether it's located inside or outside the organization's network perimeter.

In healthcare settings, ZTA can be particularly effective in securing:

- Electronic health records (EHR) systems
- Medical IoT devices
- Telehealth platforms

By implementing continuous verification mechanisms, micro-segmentation, and least privilege access, healthcare organizations can significantly reduce their attack surface and mitigate the risk of data breaches."#;

const BLOCKCHAIN_BODY: &str = r#"Blockchain technology has been heralded as a revolutionary solution for supply chain management, promising enhanced transparency, security, and efficiency. Beyond the hype, practical implementations are now demonstrating tangible benefits across various industries.

## A single source of truth

By creating an immutable ledger of transactions and events, blockchain enables all supply chain participants to access a single source of truth. This has profound implications for traceability, especially in sectors like pharmaceuticals, food, and luxury goods, where counterfeiting and authenticity verification pose significant challenges.

Smart contracts, self-executing contracts with the terms directly written into code, further enhance efficiency by automating verification processes and payments when predefined conditions are met.

While challenges such as scalability and standardization remain, forward-thinking organizations are already leveraging blockchain to gain competitive advantages through enhanced supply chain visibility and security."#;

const SMART_BUILDINGS_BODY: &str = r#"The rise of smart buildings represents one of the most significant technological transformations in commercial real estate. Modern buildings now incorporate sophisticated Building Management Systems (BMS) that control everything from HVAC and lighting to access control and surveillance.

While these interconnected systems offer unprecedented efficiency and convenience, they also introduce complex cybersecurity challenges. Each connected device potentially represents an entry point for malicious actors, creating an expanded attack surface that requires robust protection. Recent incidents have demonstrated that breaches in building systems can have serious consequences, from operational disruptions to physical security compromises.

## Building a defensible estate

A comprehensive security strategy for smart buildings must include:

- Regular vulnerability assessments
- Network segmentation
- Firmware updates
- A clear incident response plan

By adopting a security-by-design approach and implementing proper governance frameworks, commercial real estate owners and operators can harness the benefits of smart building technology while effectively managing the associated cybersecurity risks."#;

const FRAUD_DETECTION_BODY: &str = r#"In an environment where financial fraud techniques are constantly evolving, traditional rule-based detection systems are increasingly insufficient. This case study examines how a leading global bank implemented an AI-powered fraud detection system to address these challenges.

## The challenge

The bank was experiencing a significant increase in sophisticated fraud attempts that were bypassing their existing detection mechanisms, resulting in financial losses and eroded customer trust.

## The results

By implementing a machine learning solution that could analyze thousands of transaction attributes in real-time and continuously learn from new patterns, the bank achieved remarkable results. The new system reduced fraud losses by 87% within the first six months, while simultaneously decreasing false positive rates by 63%, which significantly improved the customer experience.

The implementation journey involved careful data preparation, model selection and training, integration with existing systems, and establishing appropriate governance mechanisms to ensure ethical use of AI. This case demonstrates that when properly implemented, AI-powered fraud detection can deliver compelling ROI while enhancing the overall security posture of financial institutions."#;

const MEDICAL_DEVICES_BODY: &str = r#"The proliferation of connected medical devices has transformed patient care, enabling remote monitoring, streamlined workflows, and improved treatment outcomes. However, this connectivity also introduces significant security risks that could compromise patient safety and privacy.

Many medical devices were designed with functionality as the primary concern, often lacking robust security features. Legacy devices may run outdated operating systems with known vulnerabilities, while newer devices may have inadequate encryption or authentication mechanisms. The consequences of a security breach in this context can be severe, potentially allowing attackers to manipulate device functionality or access sensitive patient data.

## What providers can do

Healthcare organizations must adopt a comprehensive approach to medical device security, including conducting thorough security assessments before procurement, implementing network segmentation to isolate devices, establishing continuous monitoring systems, and developing incident response plans specific to medical device compromises.

Manufacturers also have a responsibility to incorporate security by design, provide regular updates, and transparently disclose vulnerabilities. As regulatory frameworks evolve to address these challenges, collaboration between healthcare providers, device manufacturers, and security experts will be essential for creating a safer ecosystem of connected medical devices."#;
