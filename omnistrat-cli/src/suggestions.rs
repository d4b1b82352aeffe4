//! Built-in product ideas offered at the idea step.

use rand::seq::SliceRandom;

pub const SUGGESTIONS: [&str; 10] = [
    "AI-powered personal finance assistant for young professionals",
    "Virtual interior design platform using AR technology",
    "Sustainable meal planning app with local sourcing",
    "Remote team collaboration tool with async video messaging",
    "Smart home energy optimization system",
    "Mental health support platform for remote workers",
    "Blockchain-based supply chain transparency tool",
    "AI-driven code review and optimization platform",
    "Social learning platform for professional skills",
    "Automated customer support chatbot for e-commerce",
];

/// How many suggestions the interactive idea step lists.
pub const SHOWN: usize = 6;

/// 1-based lookup, as typed by the user.
pub fn pick(n: usize) -> Option<&'static str> {
    n.checked_sub(1).and_then(|i| SUGGESTIONS.get(i)).copied()
}

pub fn random() -> &'static str {
    SUGGESTIONS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(SUGGESTIONS[0])
}
