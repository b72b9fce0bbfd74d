//! Alert message content.
//!
//! Everything here is a pure function of the review, so the same review
//! always renders the same text regardless of channel outcome.

use chrono::SecondsFormat;

use crate::review::ReviewEvent;

/// Review text is cut to this many characters in the email body.
pub const EXCERPT_MAX_CHARS: usize = 100;

/// Appended to an excerpt that was cut.
const ELLIPSIS: &str = "…";

const CALL_TO_ACTION: &str = "管理画面で確認してください。";

/// Subject and body shared by the email channel and the quota fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub subject: String,
    pub body: String,
}

/// First [`EXCERPT_MAX_CHARS`] characters of `text`, with an ellipsis if cut.
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_MAX_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// Build the channel-agnostic alert content.
pub fn build_content(review: &ReviewEvent) -> NotificationContent {
    let subject = format!(
        "【{}】星{}の口コミを受信しました",
        review.store_name, review.rating
    );
    let body = [
        format!("店舗: {}", review.store_name),
        format!("評価: 星{}", review.rating),
        format!("投稿者: {}", review.reviewer_name),
        format!("内容: {}", excerpt(&review.review_text)),
        format!(
            "受信日時: {}",
            review.received_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        String::new(),
        CALL_TO_ACTION.to_string(),
    ]
    .join("\n");

    NotificationContent { subject, body }
}

/// Short SMS text: store and rating only, no review text.
pub fn build_sms_message(review: &ReviewEvent) -> String {
    format!(
        "【{}】星{}の口コミを受信。{CALL_TO_ACTION}",
        review.store_name, review.rating
    )
}

/// Email sent in place of an SMS when the monthly SMS quota is used up.
pub fn build_fallback_content(
    content: &NotificationContent,
    review: &ReviewEvent,
    sms_limit: u32,
) -> NotificationContent {
    NotificationContent {
        subject: format!(
            "【SMS枠切れ通知】{} - 新しい口コミがあります",
            review.store_name
        ),
        body: format!(
            "SMS送信枠（月{sms_limit}件）を使い切りました。\n\n{}",
            content.body
        ),
    }
}
