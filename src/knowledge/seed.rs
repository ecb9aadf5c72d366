use super::store::{KnowledgeError, KnowledgeStore, NewKnowledgeEntry};

const SAMPLE_FAQS: [(&str, &str, &str); 10] = [
    (
        "What are your business hours?",
        "We are open Monday to Friday from 9:00 AM to 6:00 PM EST. Weekend support is available via email.",
        "General",
    ),
    (
        "How do I reset my password?",
        "To reset your password, click on \"Forgot Password\" on the login page. Enter your email address and follow the instructions sent to your inbox.",
        "Account",
    ),
    (
        "What payment methods do you accept?",
        "We accept all major credit cards (Visa, MasterCard, American Express), PayPal, and bank transfers for enterprise customers.",
        "Billing",
    ),
    (
        "How can I track my order?",
        "Once your order ships, you will receive a tracking number via email. You can also check your order status in the \"My Orders\" section of your account.",
        "Orders",
    ),
    (
        "What is your refund policy?",
        "We offer a 30-day money-back guarantee. If you are not satisfied with your purchase, contact our support team within 30 days for a full refund.",
        "Billing",
    ),
    (
        "How do I contact customer support?",
        "You can reach our support team via email at support@company.com, through live chat on our website, or by calling 1-800-SUPPORT during business hours.",
        "General",
    ),
    (
        "Do you offer international shipping?",
        "Yes, we ship to over 100 countries worldwide. Shipping costs and delivery times vary by location. Check our shipping page for details.",
        "Shipping",
    ),
    (
        "How do I update my account information?",
        "Log into your account and navigate to \"Account Settings\". From there, you can update your email, password, billing address, and other details.",
        "Account",
    ),
    (
        "What should I do if I receive a damaged product?",
        "We apologize for any inconvenience. Please contact our support team immediately with photos of the damage. We will arrange a replacement or refund.",
        "Orders",
    ),
    (
        "Do you have a mobile app?",
        "Yes! Our mobile app is available for both iOS and Android. Download it from the App Store or Google Play Store.",
        "General",
    ),
];

pub fn sample_faqs() -> Vec<NewKnowledgeEntry> {
    SAMPLE_FAQS
        .iter()
        .map(|(question, answer, category)| NewKnowledgeEntry::new(question, answer, Some(*category)))
        .collect()
}

/// Inserts the sample FAQs as one batch when the store is empty. Returns how
/// many were added.
pub async fn seed_if_empty(store: &dyn KnowledgeStore) -> Result<usize, KnowledgeError> {
    if store.count().await? > 0 {
        return Ok(0);
    }

    let inserted = store.insert_many(sample_faqs()).await?.len();
    tracing::info!("Inserted {} sample FAQs", inserted);
    Ok(inserted)
}
