//! Compiled-in catalog data. Served whenever the real catalog store errors out or has nothing
//! in it, so the storefront always has something to render.

use apg_common::UsdAmount;
use chrono::Utc;

use crate::catalog_objects::{Channel, ChannelType, Package, Product, ProductKind};

fn channel(id: &str, name: &str, username: &str, subscribers: i64, channel_type: ChannelType) -> Channel {
    Channel {
        id: id.to_string(),
        created_at: Utc::now(),
        name: name.to_string(),
        username: Some(username.to_string()),
        subscribers,
        channel_type,
        is_active: true,
        avatar_url: None,
    }
}

pub fn fixture_channels() -> Vec<Channel> {
    use ChannelType::*;
    vec![
        channel("1", "Crypto Insider", "@crypto_insider", 154_000, Channel),
        channel("2", "Tech Startups", "@tech_startups", 89_000, Channel),
        channel("3", "Design & UI", "@design_daily", 45_000, Chat),
        channel("4", "Global News", "@world_news", 500_000, Channel),
        channel("5", "Meme King", "@memeking_official", 230_000, Channel),
        channel("6", "Business Daily", "@business_daily", 112_000, Channel),
        channel("7", "Fashion Week", "@fashion_week", 78_000, Channel),
        channel("8", "Crypto Chat", "@crypto_chat_en", 15_000, Chat),
        channel("9", "Developers Den", "@devs_den", 34_000, Chat),
        channel("10", "Health & Fitness", "@fit_life", 145_000, Channel),
        channel("11", "Travel Guide", "@travel_the_world", 210_000, Channel),
        channel("12", "Movies & Cinema", "@cinema_fans", 95_000, Channel),
        channel("13", "Startup Ideas", "@startup_ideas", 67_000, Channel),
        channel("14", "Marketing Pro", "@marketing_pro", 125_000, Channel),
        channel("15", "AI Revolution", "@ai_news_daily", 310_000, Channel),
        channel("16", "Freelance Jobs", "@freelance_board", 88_000, Chat),
        channel("17", "Music Hits", "@music_vibes", 420_000, Channel),
        channel("18", "Science Fact", "@science_daily", 195_000, Channel),
        channel("19", "Gaming World", "@gamers_hub", 280_000, Chat),
        channel("20", "History Channel", "@history_facts", 160_000, Channel),
        channel("21", "Car Enthusiasts", "@auto_drive", 220_000, Channel),
        channel("22", "Cooking Master", "@chef_recipes", 135_000, Channel),
    ]
}

/// Price multiplier for a channel. Larger audiences cost more; the floor stops small channels
/// from becoming free.
fn price_multiplier(subscribers: i64) -> f64 {
    (subscribers as f64 / 50_000.0).max(0.5)
}

fn scaled_price(base: f64, multiplier: f64) -> UsdAmount {
    UsdAmount::from_dollars((base * multiplier).round() as i64)
}

/// Generates the product list for the fixture channels. Chats sell a pinned message (no
/// top-slot extra), channels sell an ad post plus a native integration with no extras.
pub fn fixture_products() -> Vec<Product> {
    let mut products = Vec::new();
    for channel in fixture_channels() {
        let m = price_multiplier(channel.subscribers);
        let is_chat = channel.channel_type == ChannelType::Chat;
        products.push(Product {
            id: format!("p_{}_1", channel.id),
            channel_id: channel.id.clone(),
            name: if is_chat { "Закреп в чате" } else { "Рекламный пост" }.to_string(),
            product_type: if is_chat { ProductKind::Pin } else { ProductKind::Post },
            base_price: scaled_price(100.0, m),
            top_6h_price: if is_chat { UsdAmount::from_cents(0) } else { scaled_price(20.0, m) },
            pin_24h_price: scaled_price(40.0, m),
            pin_48h_price: scaled_price(70.0, m),
            is_active: true,
        });
        if !is_chat {
            products.push(Product {
                id: format!("p_{}_2", channel.id),
                channel_id: channel.id.clone(),
                name: "Нативная интеграция".to_string(),
                product_type: ProductKind::Native,
                base_price: scaled_price(250.0, m),
                top_6h_price: UsdAmount::from_cents(0),
                pin_24h_price: UsdAmount::from_cents(0),
                pin_48h_price: UsdAmount::from_cents(0),
                is_active: true,
            });
        }
    }
    products
}

pub fn fixture_packages() -> Vec<Package> {
    vec![
        Package {
            id: "pkg1".to_string(),
            name: "Smart".to_string(),
            description: "Быстрый старт для новых проектов".to_string(),
            price: UsdAmount::from_dollars(299),
            posts_count: 5,
            includes_help: true,
            includes_stats: false,
            includes_guarantee: false,
            bonus_posts: 1,
            discount_percent: 50,
            is_popular: false,
            is_active: true,
        },
        Package {
            id: "pkg2".to_string(),
            name: "Pro".to_string(),
            description: "Оптимальный выбор для масштабирования".to_string(),
            price: UsdAmount::from_dollars(599),
            posts_count: 12,
            includes_help: true,
            includes_stats: true,
            includes_guarantee: true,
            bonus_posts: 3,
            discount_percent: 60,
            is_popular: true,
            is_active: true,
        },
        Package {
            id: "pkg3".to_string(),
            name: "Business".to_string(),
            description: "Максимальный охват и поддержка".to_string(),
            price: UsdAmount::from_dollars(1499),
            posts_count: 30,
            includes_help: true,
            includes_stats: true,
            includes_guarantee: true,
            bonus_posts: 10,
            discount_percent: 45,
            is_popular: false,
            is_active: true,
        },
    ]
}
