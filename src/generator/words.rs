/// Adjectives used as the first half of human-readable stems
pub const ADJECTIVES: [&str; 20] = [
    "Swift", "Brave", "Clever", "Mighty", "Silent", "Happy", "Lucky", "Bright", "Cosmic", "Fuzzy",
    "Gentle", "Jolly", "Noble", "Quick", "Rapid", "Shiny", "Sunny", "Witty", "Zesty", "Bold",
];

/// Nouns used as the second half of human-readable stems
pub const NOUNS: [&str; 20] = [
    "Tiger", "Falcon", "Panda", "Otter", "Wizard", "Rocket", "Comet", "Dragon", "Phoenix", "Knight",
    "Ninja", "Pirate", "Raven", "Wolf", "Fox", "Bear", "Eagle", "Lion", "Shark", "Owl",
];
