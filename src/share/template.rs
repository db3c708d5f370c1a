//! 分享文案与 Kakao feed 模板。

use serde_json::{Value, json};

use crate::config::ShareSettings;

pub const CHALLENGE_BUTTON_TITLE: &str = "도전하러 가기";

/// 结果页分享文案。
pub fn score_message(score: u32) -> String {
    format!("내 점수는 {}점! 너도 도전해볼래?", score)
}

/// 构建 Kakao `sendDefault` 使用的 feed 模板。
pub fn feed_template(settings: &ShareSettings, image_url: &str, score: u32) -> Value {
    let link = json!({
        "mobileWebUrl": settings.site_url,
        "webUrl": settings.site_url,
    });

    json!({
        "objectType": "feed",
        "content": {
            "title": settings.title,
            "description": score_message(score),
            "imageUrl": image_url,
            "link": link,
        },
        "buttons": [
            {
                "title": CHALLENGE_BUTTON_TITLE,
                "link": link,
            }
        ]
    })
}

/// “复制链接”写入剪贴板的文本：标题、站点、文案、图片地址各占一行。
pub fn copy_link_text(settings: &ShareSettings, image_url: &str, score: u32) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        settings.title,
        settings.site_url,
        score_message(score),
        image_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_template_embeds_score_and_image() {
        let settings = ShareSettings::default();
        let template = feed_template(&settings, "https://i.ibb.co/x.png", 87);

        assert_eq!(template["objectType"], "feed");
        assert_eq!(template["content"]["imageUrl"], "https://i.ibb.co/x.png");
        assert_eq!(template["content"]["description"], "내 점수는 87점! 너도 도전해볼래?");
        assert_eq!(template["buttons"][0]["link"]["webUrl"], settings.site_url.as_str());
    }

    #[test]
    fn copy_text_has_four_lines() {
        let mut settings = ShareSettings::default();
        settings.site_url = "https://example.com".to_string();

        let text = copy_link_text(&settings, "https://i.ibb.co/x.png", 5);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "https://example.com");
        assert_eq!(lines[3], "https://i.ibb.co/x.png");
    }
}
