//! Canned twin replies used when the chat backend is unreachable.

/// Keyword rules checked in order against the lower-cased message.
const RULES: &[(&[&str], &str)] = &[
    (
        &["skincare", "routine"],
        "As someone who values evidence-based skincare, I'd say consistency is key. \
         I personally use a simple routine with cleanser, moisturizer, and sunscreen daily. \
         The most important thing is finding products that work for your specific skin type \
         and sticking with them long enough to see results.",
    ),
    (
        &["health", "wellness"],
        "I believe in a holistic approach to health - it's not just about one thing, but how \
         everything connects. Good sleep, regular movement, nutrition that feels sustainable, \
         and managing stress all play important roles. What matters most is finding what works \
         for your lifestyle.",
    ),
    (
        &["decision", "choose"],
        "When I'm making decisions, I like to gather information first, but I don't get stuck \
         in analysis paralysis. I consider both the practical aspects and how I feel about it. \
         Sometimes the best choice becomes clear when you think about what you'll regret not trying.",
    ),
    (
        &["work", "career"],
        "I think finding meaning in your work is really important, whether that's through the \
         impact you have, the people you work with, or the skills you're developing. It's also \
         okay for work to just be one part of your life rather than your entire identity.",
    ),
];

const DEFAULT_REPLY: &str = "That's an interesting question! I think it really depends on the \
    specific context and what matters most to you. What's your take on it? I'd love to hear your \
    perspective - it might help me think about it in a new way.";

pub fn mock_chat_response(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_REPLY)
}
