//! WhatsApp deep links (`https://wa.me/<digits>?text=<message>`).

const WA_BASE: &str = "https://wa.me/";

/// Keep only the ASCII digits of a phone number: `"(99) 99999-9999"` → `"99999999999"`.
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Link that opens a chat with `phone`, with no pre-filled text.
pub fn contact_link(phone: &str) -> String {
    format!("{WA_BASE}{}", digits_only(phone))
}

/// Link that opens a chat with `phone` and pre-fills `message`.
pub fn chat_link(phone: &str, message: &str) -> String {
    format!(
        "{WA_BASE}{}?text={}",
        digits_only(phone),
        urlencoding::encode(message)
    )
}

/// The message a customer sends when asking about a post.
pub fn interest_message(post_title: &str) -> String {
    format!(
        "Oi! Vim do seu Status. Quero falar sobre o post \"{post_title}\" que vi agora há pouco."
    )
}
