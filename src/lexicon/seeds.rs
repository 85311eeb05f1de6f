//! Curated seed vocabulary for the deployed electronics catalog.

/// Product-type seeds. Expanded through a synonym source at build time.
pub const SEED_PRODUCT_TYPES: &[&str] = &[
    // Mobile and accessories
    "phone",
    "smartphone",
    "mobile",
    "charger",
    "adapter",
    "cable",
    "powerbank",
    // Audio
    "headphone",
    "speaker",
    "microphone",
    "earphone",
    // Computing
    "laptop",
    "tablet",
    "computer",
    // Peripherals
    "monitor",
    "keyboard",
    "mouse",
    "printer",
    "scanner",
    "webcam",
    "camera",
    // Storage
    "harddisk",
    "pendrive",
    // Wearables
    "watch",
    "smartwatch",
    // Home appliances
    "refrigerator",
    "fridge",
    "washing machine",
    "television",
    "microwave",
    "oven",
    // Gaming
    "console",
    "controller",
    // Components
    "processor",
    "motherboard",
    "graphics card",
    "memory",
];

/// Brand seeds, used verbatim.
pub const SEED_BRANDS: &[&str] = &[
    "apple",
    "samsung",
    "sony",
    "nike",
    "adidas",
    "dell",
    "hp",
    "lenovo",
    "asus",
    "lg",
    "xiaomi",
    "oneplus",
    "oppo",
    "vivo",
    "realme",
    "poco",
    "motorola",
    "google",
    "microsoft",
    "amazon",
    "huawei",
    "honor",
    "nokia",
    "jbl",
    "boat",
    "skullcandy",
    "corsair",
    "razer",
    "logitech",
    "philips",
    "whirlpool",
    "haier",
    "voltas",
    "godrej",
    "croma",
    "fireboltt",
    "noise",
    "fastrack",
    "titan",
    "casio",
    "fossil",
    "garmin",
    "fitbit",
    "mi",
];

/// Specification seeds: units, component names and product-line tokens.
pub const SEED_SPECIFICATIONS: &[&str] = &[
    "iphone",
    "ipad",
    "macbook",
    "mac",
    "gb",
    "tb",
    "mb",
    "ram",
    "rom",
    "ssd",
    "hdd",
    "processor",
    "cpu",
    "gpu",
    "graphics",
    "card",
    "motherboard",
    "cooler",
    "fan",
    "ups",
    "inverter",
    "washing",
    "machine",
    "game",
    "console",
    "projector",
    "speaker",
    "soundbar",
    "microphone",
    "webcam",
    "scanner",
    "pen",
    "drive",
    "memory",
    "adapter",
];
