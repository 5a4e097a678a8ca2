//! Default data returned by the local adapter when nothing is stored yet.

use crate::models::{BusinessProfile, Post, PostStatus, Theme};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

/// The demo profile shown before any owner saves one on this device.
pub fn default_business() -> BusinessProfile {
    BusinessProfile {
        name: "Loja do João".to_string(),
        bio: "Gerencie seus status de forma profissional e rápida com o Status Pro.".to_string(),
        logo_url: "https://picsum.photos/seed/shop/200/200".to_string(),
        whatsapp: "(99) 99999-9999".to_string(),
        email: "admin@statuspro.com.br".to_string(),
        is_verified: true,
        theme: Theme::Light,
    }
}

/// Demo posts, newest first, aged relative to `now_ms`.
pub fn default_posts(now_ms: i64) -> Vec<Post> {
    vec![
        Post {
            id: "1".to_string(),
            title: "Confira nossa nova coleção de verão! ☀️".to_string(),
            description: "Temos diversos tamanhos e cores disponíveis para entrega imediata."
                .to_string(),
            image_url: "https://picsum.photos/seed/fashion/800/1000".to_string(),
            created_at: now_ms - 15 * MINUTE_MS,
            status: PostStatus::Active,
            is_offer: false,
            is_new: true,
        },
        Post {
            id: "2".to_string(),
            title: "Novidades na vitrine de hoje!".to_string(),
            description: "Venha conferir nossos acessórios exclusivos. Edição limitada!"
                .to_string(),
            image_url: "https://picsum.photos/seed/accessories/800/1000".to_string(),
            created_at: now_ms - 2 * HOUR_MS,
            status: PostStatus::Active,
            is_offer: false,
            is_new: false,
        },
        Post {
            id: "3".to_string(),
            title: "Últimas unidades em promoção".to_string(),
            description: "Descontos de até 30% enquanto durar o estoque. Aproveite!".to_string(),
            image_url: "https://picsum.photos/seed/sale/800/1000".to_string(),
            created_at: now_ms - 5 * HOUR_MS,
            status: PostStatus::Active,
            is_offer: true,
            is_new: false,
        },
    ]
}

/// Editable starting point for an owner who has no business record yet.
///
/// Keeps the demo bio, logo and theme but blanks the fields the owner must
/// fill in, and binds the profile to the signed-in email.
pub fn blank_business_for(email: &str) -> BusinessProfile {
    BusinessProfile {
        name: String::new(),
        whatsapp: String::new(),
        email: email.to_string(),
        ..default_business()
    }
}
