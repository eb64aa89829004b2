const ANIMALS: [&str; 10] = [
    "강아지", "고양이", "호랑이", "사자", "기린", "코끼리", "토끼", "다람쥐", "펭귄", "판다",
];

const FOOD: [&str; 10] = [
    "떡볶이", "피자", "치킨", "햄버거", "탕수육", "자장면", "김밥", "라면", "돈가스", "샌드위치",
];

const SCHOOL_SUPPLIES: [&str; 10] = [
    "연필", "지우개", "공책", "필통", "가방", "칠판", "분필", "실내화", "교과서", "자",
];

const DEFAULT: [&str; 10] = [
    "사과", "바나나", "포도", "수박", "딸기", "메론", "귤", "키위", "복숭아", "참외",
];

/// Built-in words for a category display name, used whenever the remote source fails.
/// Categories without a dedicated list get the default one, so the result is never empty.
pub fn fallback_words(category_name: &str) -> Vec<String> {
    let words: &[&str] = match category_name {
        "동물 친구들" => &ANIMALS,
        "맛있는 음식" => &FOOD,
        "학교 물건" => &SCHOOL_SUPPLIES,
        _ => &DEFAULT,
    };
    words.iter().map(|word| word.to_string()).collect()
}
