use serde::{Deserialize, Serialize};

use super::Restaurant;

/// A named preset mapping to a fixed keyword list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mood {
    /// Key as shown to users
    pub key: &'static str,
    /// ASCII alias accepted in place of the key
    pub slug: &'static str,
    pub keywords: &'static [&'static str],
}

pub static MOODS: [Mood; 10] = [
    Mood {
        key: "吃點罪惡的",
        slug: "indulgent",
        keywords: &["美式", "韓式", "炸物", "義式", "甜點", "港式"],
    },
    Mood {
        key: "低熱量清爽健康",
        slug: "light-and-healthy",
        keywords: &["健康"],
    },
    Mood {
        key: "趕時間吃快點",
        slug: "in-a-hurry",
        keywords: &["平價快食", "便當"],
    },
    Mood {
        key: "天氣很熱",
        slug: "hot-weather",
        keywords: &["冰店"],
    },
    Mood {
        key: "天氣很冷",
        slug: "cold-weather",
        keywords: &["鍋物", "麵食"],
    },
    Mood {
        key: "半夜肚子餓",
        slug: "late-night",
        keywords: &["宵夜", "炸物", "甜點"],
    },
    Mood {
        key: "聚餐",
        slug: "group-dinner",
        keywords: &["精緻聚餐", "咖啡廳", "早午餐", "打卡店"],
    },
    Mood {
        key: "讀書辦公",
        slug: "study-and-work",
        keywords: &["咖啡廳"],
    },
    Mood {
        key: "異國料理探險",
        slug: "world-cuisine",
        keywords: &["日式", "美式", "韓式", "泰式", "印度料理", "義式", "越式料理", "港式"],
    },
    Mood {
        key: "下午茶時光",
        slug: "afternoon-tea",
        keywords: &["咖啡廳", "飲料", "甜點"],
    },
];

impl Mood {
    /// Finds a mood by key or slug
    pub fn lookup(name: &str) -> Option<&'static Mood> {
        let name = name.trim();
        MOODS.iter().find(|mood| mood.key == name || mood.slug == name)
    }

    /// Case-sensitive substring match of any keyword against the category
    /// tags or the name
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.keywords.iter().any(|keyword| {
            restaurant.name.contains(keyword)
                || restaurant.category_tags.iter().any(|tag| tag.contains(keyword))
        })
    }
}

/// How a selected mood interacts with the price/location/category filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodPolicy {
    /// A mood replaces the attribute filters entirely
    #[default]
    Exclusive,
    /// A mood narrows the attribute filters
    Combined,
}
