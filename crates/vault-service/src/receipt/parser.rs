//! Heuristics that turn raw receipt text into warranty field suggestions.
//!
//! Everything here is a pure function of the text (plus the fallback date),
//! so the rules are tested directly on sample receipts.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use vault_entity::warranty::WarrantyCategory;

use super::ReceiptScan;

const PRODUCT_SCAN_LINES: usize = 15;
const PRODUCT_MAX_CHARS: usize = 100;
const BRAND_SCAN_WORDS: usize = 20;
const BRAND_MAX_CHARS: usize = 50;
const DEFAULT_WARRANTY_MONTHS: u32 = 12;
/// Length of raw text kept on the scan result.
pub const EXTRACTED_TEXT_CHARS: usize = 500;

static LEADING_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[/-]\d+").expect("valid regex"));
static BARE_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$?\d+\.?\d*$").expect("valid regex"));
static DOCUMENT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)receipt|invoice|bill").expect("valid regex"));

static BRAND_LABELS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["brand", "manufacturer", "make"]
        .iter()
        .map(|label| {
            Regex::new(&format!(r"(?i)\b{label}[:\s]+([A-Za-z0-9][A-Za-z0-9 \t]*)"))
                .expect("valid regex")
        })
        .collect()
});

static DATE_PATTERNS: LazyLock<Vec<(Regex, &'static [&'static str])>> = LazyLock::new(|| {
    const NUMERIC: &[&str] = &["%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y", "%d-%m-%Y"];
    const NUMERIC_SHORT: &[&str] = &["%m/%d/%y", "%d/%m/%y", "%m-%d-%y", "%d-%m-%y"];
    const ISO: &[&str] = &["%Y/%m/%d", "%Y-%m-%d"];
    const NAMED: &[&str] = &["%B %d %Y", "%b %d %Y"];
    vec![
        (
            Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{4}\b").expect("valid regex"),
            NUMERIC,
        ),
        (
            Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2}\b").expect("valid regex"),
            NUMERIC_SHORT,
        ),
        (
            Regex::new(r"\b\d{4}[/-]\d{1,2}[/-]\d{1,2}\b").expect("valid regex"),
            ISO,
        ),
        (
            Regex::new(r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{1,2},?\s+\d{4}\b")
                .expect("valid regex"),
            NAMED,
        ),
    ]
});

static PERIOD_PATTERNS: LazyLock<Vec<(Regex, bool)>> = LazyLock::new(|| {
    [
        (r"(?i)(\d+)\s*years?\s*warranty", true),
        (r"(?i)(\d+)\s*months?\s*warranty", false),
        (r"(?i)warranty[:\s]+(\d+)\s*years?", true),
        (r"(?i)warranty[:\s]+(\d+)\s*months?", false),
        (r"(?i)(\d+)\s*yrs?\s*warranty", true),
    ]
    .into_iter()
    .map(|(pattern, years)| (Regex::new(pattern).expect("valid regex"), years))
    .collect()
});

static CATEGORY_KEYWORDS: LazyLock<Vec<(WarrantyCategory, Vec<Regex>)>> = LazyLock::new(|| {
    let table: [(WarrantyCategory, &[&str]); 5] = [
        (
            WarrantyCategory::Electronics,
            &[
                "laptop", "computer", "phone", "mobile", "tablet", "camera", "headphone",
                "speaker", "monitor", "keyboard", "mouse", "printer", "scanner", "tv",
                "television", "smartwatch", "earbuds", "charger", "electronics",
            ],
        ),
        (
            WarrantyCategory::HomeAppliances,
            &[
                "refrigerator", "fridge", "washing machine", "washer", "dryer", "microwave",
                "oven", "dishwasher", "vacuum", "air conditioner", "ac", "heater", "fan",
                "blender", "mixer", "toaster", "appliance",
            ],
        ),
        (
            WarrantyCategory::Furniture,
            &[
                "sofa", "couch", "chair", "table", "desk", "bed", "mattress", "cabinet",
                "shelf", "wardrobe", "furniture", "dresser",
            ],
        ),
        (
            WarrantyCategory::Automotive,
            &[
                "car", "vehicle", "auto", "tire", "battery", "automotive", "motorcycle",
                "bike", "scooter",
            ],
        ),
        (
            WarrantyCategory::Accessories,
            &["watch", "bag", "wallet", "belt", "sunglasses", "jewelry", "accessory"],
        ),
    ];
    table
        .into_iter()
        .map(|(category, words)| {
            let patterns = words
                .iter()
                .map(|w| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(w))).expect("valid regex"))
                .collect();
            (category, patterns)
        })
        .collect()
});

/// First plausible product line among the first lines of the receipt.
pub fn parse_product_name(text: &str) -> String {
    text.lines()
        .take(PRODUCT_SCAN_LINES)
        .map(str::trim)
        .find(|line| {
            line.chars().count() > 5
                && !line.chars().all(|c| c.is_ascii_digit())
                && !LEADING_DATE.is_match(line)
                && !BARE_PRICE.is_match(line)
                && !DOCUMENT_WORD.is_match(line)
        })
        .map(|line| truncate_chars(line, PRODUCT_MAX_CHARS))
        .unwrap_or_default()
}

/// An explicit `Brand:` style label, else the first all-caps word.
pub fn parse_brand(text: &str) -> String {
    for pattern in BRAND_LABELS.iter() {
        if let Some(found) = pattern.captures(text).and_then(|c| c.get(1)) {
            let brand = found.as_str().trim();
            if !brand.is_empty() {
                return truncate_chars(brand, BRAND_MAX_CHARS);
            }
        }
    }

    text.split_whitespace()
        .take(BRAND_SCAN_WORDS)
        .find(|word| word.chars().count() > 2 && is_all_caps(word))
        .map(|word| truncate_chars(word, BRAND_MAX_CHARS))
        .unwrap_or_default()
}

/// First date in the text that parses under one of the known layouts.
/// Month-first wins over day-first when both are valid.
pub fn parse_purchase_date(text: &str) -> Option<NaiveDate> {
    DATE_PATTERNS.iter().find_map(|(pattern, formats)| {
        let candidate = pattern.find(text)?.as_str().replace(',', " ");
        formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&candidate, fmt).ok())
    })
}

/// Warranty length in months; years are converted. Defaults to 12.
pub fn parse_warranty_months(text: &str) -> u32 {
    PERIOD_PATTERNS
        .iter()
        .find_map(|(pattern, years)| {
            let n: u32 = pattern.captures(text)?.get(1)?.as_str().parse().ok()?;
            Some(if *years { n.saturating_mul(12) } else { n })
        })
        .unwrap_or(DEFAULT_WARRANTY_MONTHS)
}

/// Category with the most distinct keyword hits. Ties go to the category
/// listed first; no hits means `Other`.
pub fn detect_category(text: &str) -> WarrantyCategory {
    let mut best = (WarrantyCategory::Other, 0usize);
    for (category, patterns) in CATEGORY_KEYWORDS.iter() {
        let score = patterns.iter().filter(|p| p.is_match(text)).count();
        if score > best.1 {
            best = (*category, score);
        }
    }
    best.0
}

/// 40 for a product name, 30 for a brand, 30 for a date found in the text.
pub fn confidence(product_name: &str, brand: &str, date_found: bool) -> u8 {
    let mut score = 0u8;
    if product_name.chars().count() > 5 {
        score += 40;
    }
    if brand.chars().count() > 2 {
        score += 30;
    }
    if date_found {
        score += 30;
    }
    score.min(100)
}

/// Run every heuristic over `text`. `today` fills in a missing purchase date.
pub fn parse_receipt(text: &str, today: NaiveDate) -> ReceiptScan {
    let product_name = parse_product_name(text);
    let brand = parse_brand(text);
    let found_date = parse_purchase_date(text);
    let confidence = confidence(&product_name, &brand, found_date.is_some());

    ReceiptScan {
        product_name,
        brand,
        purchase_date: found_date.unwrap_or(today),
        warranty_period: parse_warranty_months(text),
        category: detect_category(text),
        confidence,
        extracted_text: truncate_chars(text, EXTRACTED_TEXT_CHARS),
    }
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

/// Truncate on a character boundary.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
