//! Per-tier wording for notices and their email copies.

use chrono::NaiveDate;

use vault_entity::notification::NotificationTier;
use vault_entity::warranty::Warranty;

use crate::delivery::OutgoingEmail;

/// Title and body of one notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeText {
    pub title: String,
    pub message: String,
}

/// Dates in notices read like "March 05, 2026".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Title and body for `tier`, naming the product, brand and expiry date.
pub fn notice_text(tier: NotificationTier, product: &str, brand: &str, expiry: NaiveDate) -> NoticeText {
    let on = format_date(expiry);
    let item = format!("{product} ({brand})");
    let (title, message) = match tier {
        NotificationTier::ThirtyDays => (
            format!("⚠️ Warranty Expiring Soon - {product}"),
            format!(
                "Your warranty for {item} will expire in 30 days on {on}. \
                 Please take necessary action if needed."
            ),
        ),
        NotificationTier::TwentyDays => (
            format!("⚠️ Warranty Alert - {product}"),
            format!("Only 20 days left! Your warranty for {item} expires on {on}."),
        ),
        NotificationTier::TenDays => (
            format!("⚠️ Warranty Expiring - {product}"),
            format!("Just 10 days remaining! Your warranty for {item} expires on {on}."),
        ),
        NotificationTier::ThreeDays => (
            format!("🚨 Urgent: Warranty Expiring - {product}"),
            format!("Only 3 days left! Your warranty for {item} expires on {on}. Act now!"),
        ),
        NotificationTier::TwoDays => (
            format!("🚨 Urgent: 2 Days Left - {product}"),
            format!("Your warranty for {item} expires in 2 days on {on}."),
        ),
        NotificationTier::OneDay => (
            format!("🚨 Last Day: Warranty Expires Tomorrow - {product}"),
            format!("Final reminder! Your warranty for {item} expires tomorrow on {on}."),
        ),
        NotificationTier::Expired => (
            format!("❌ Warranty Expired - {product}"),
            format!("Your warranty for {item} has expired as of {on}."),
        ),
    };
    NoticeText { title, message }
}

/// Email copy of a notice: subject is the title, text is the body, and the
/// HTML part lists the warranty details.
pub fn notice_email(
    to: &str,
    notice: &NoticeText,
    warranty: &Warranty,
    expiry: NaiveDate,
    days_remaining: i64,
) -> OutgoingEmail {
    let rows = [
        ("Product", escape_html(&warranty.product_name)),
        ("Brand", escape_html(&warranty.brand)),
        ("Category", warranty.category.as_str().to_string()),
        ("Purchase Date", format_date(warranty.purchase_date)),
        ("Expiry Date", format_date(expiry)),
        ("Days Remaining", day_count(days_remaining)),
    ];
    let details: String = rows
        .iter()
        .map(|(label, value)| {
            format!(
                "<div class=\"detail-row\"><span class=\"label\">{label}:</span> \
                 <span class=\"value\">{value}</span></div>\n"
            )
        })
        .collect();

    let html = format!(
        "<!DOCTYPE html>\n<html>\n<body style=\"font-family: Arial, sans-serif; color: #333;\">\n\
         <div class=\"container\" style=\"max-width: 600px; margin: 0 auto; padding: 20px;\">\n\
         <h1>🛡️ Warranty Vault</h1>\n<p>Warranty Expiry Notification</p>\n\
         <h2>{title}</h2>\n<p>{message}</p>\n\
         <div class=\"warranty-details\">\n<h3>Warranty Details:</h3>\n{details}</div>\n\
         <p>Log in to your Warranty Vault account to view all your warranties and take necessary action.</p>\n\
         <p style=\"color: #6b7280; font-size: 12px;\">This is an automated notification from Warranty Vault.</p>\n\
         </div>\n</body>\n</html>\n",
        title = escape_html(&notice.title),
        message = escape_html(&notice.message),
    );

    OutgoingEmail {
        to: to.to_string(),
        subject: notice.title.clone(),
        text: notice.message.clone(),
        html: Some(html),
    }
}

fn day_count(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
