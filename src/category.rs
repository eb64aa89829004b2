use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

pub static CATEGORIES: [Category; 6] = [
    Category {
        id: "animals",
        name: "동물 친구들",
        icon: "🐶",
        color: "bg-orange-400",
    },
    Category {
        id: "food",
        name: "맛있는 음식",
        icon: "🍕",
        color: "bg-red-400",
    },
    Category {
        id: "school",
        name: "학교 물건",
        icon: "🎒",
        color: "bg-blue-400",
    },
    Category {
        id: "fruits",
        name: "달콤한 과일",
        icon: "🍓",
        color: "bg-pink-400",
    },
    Category {
        id: "places",
        name: "재미있는 장소",
        icon: "🎡",
        color: "bg-green-400",
    },
    Category {
        id: "sports",
        name: "신나는 운동",
        icon: "⚽",
        color: "bg-yellow-400",
    },
];

impl Category {
    pub fn find(id: &str) -> Option<Category> {
        CATEGORIES.iter().find(|category| category.id == id).copied()
    }

    pub fn all() -> &'static [Category] {
        &CATEGORIES
    }
}
