/// Answer categories ("fields") a round can ask for: name, family name,
/// fruit, colour, car, animal, city, country, food, object.
pub const CATEGORIES: [&str; 10] = [
    "اسم", "فامیل", "میوه", "رنگ", "ماشین", "حیوان", "شهر", "کشور", "غذا", "اشیا",
];
