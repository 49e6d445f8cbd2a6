//! HTML for the config form and the result page.

use crate::app::form::{
    COURTESY_TONE_FIELD, LOCAL_COURTESY_TONE_FIELD, TALKGROUP_FIELD, TIMEOUT_FIELD,
    VOICE_PROMPTS_FIELD,
};
use crate::app::store::StationConfig;

const TITLE: &str = "P25NX Local Config";
const TITLE_STYLE: &str = "color:blue;margin-left:30px;";

/// The form, pre-filled with the current settings. Posts to `/form`.
pub fn config_page(config: &StationConfig) -> String {
    let mut html = String::new();
    html.push_str("<html xmlns='http://www.w3.org/1999/xhtml' dir='ltr' lang='en'>\n");
    html.push_str("<head>\n");
    html.push_str("<meta http-equiv='Content-Type' content='text/html; charset=ISO-8859-1' />\n");
    html.push_str("</head>\n");
    html.push_str(&format!("<body><h1 style='{TITLE_STYLE}'>{TITLE}</h1>\n"));
    html.push_str("<form method=post action=/form>\n");
    html.push_str(&format!(
        "Default TalkGroup: <input type=text name={TALKGROUP_FIELD} value='{}'>\n",
        escape(&config.default_talkgroup)
    ));
    html.push_str(&format!(
        "<br>Default TG Timeout: <input type=text name={TIMEOUT_FIELD} value='{}'>\n",
        config.default_timeout
    ));
    html.push_str("<br>\n");
    checkbox(&mut html, "Use Voice Prompts", VOICE_PROMPTS_FIELD, config.use_voice_prompts);
    checkbox(&mut html, "Use Remote Courtesy Tone", COURTESY_TONE_FIELD, config.use_courtesy_tone);
    checkbox(
        &mut html,
        "Use Local Courtesy Tone",
        LOCAL_COURTESY_TONE_FIELD,
        config.use_local_courtesy_tone,
    );
    html.push_str("<br><hr><input type=submit>\n");
    html.push_str("</form>\n</body></html>\n");
    html
}

pub fn saved_page() -> String {
    format!(
        "<html><body><h1 style='{TITLE_STYLE}'>{TITLE} Result</h1>\n\
         <h2 style='{TITLE_STYLE}'>Config Saved.</h2>\n\
         <a href=/>return</a><p>\n\
         </body></html>\n"
    )
}

fn checkbox(html: &mut String, label: &str, name: &str, on: bool) {
    let checked = if on { " checked" } else { "" };
    html.push_str(&format!("{label}: <input type=checkbox name={name}{checked}><br>\n"));
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_boxes_follow_config() {
        let config = StationConfig {
            default_talkgroup: "10200".to_string(),
            default_timeout: 30,
            use_voice_prompts: true,
            use_courtesy_tone: false,
            use_local_courtesy_tone: true,
        };

        let html = config_page(&config);

        assert!(html.contains("name=deftg value='10200'"));
        assert!(html.contains("name=defto value='30'"));
        assert!(html.contains("name=voiceprompts checked>"));
        assert!(html.contains("name=ctone>"));
        assert!(html.contains("name=lctone checked>"));
        assert!(html.contains(">P25NX Local Config</h1>"));
    }

    #[test]
    fn saved_page_confirms() {
        let html = saved_page();

        assert!(html.contains(">P25NX Local Config Result</h1>"));
        assert!(html.contains("Config Saved."));
        assert!(html.contains("<a href=/>return</a>"));
    }

    #[test]
    fn value_attribute_is_escaped() {
        assert_eq!(escape("a'<b>"), "a&#39;&lt;b&gt;");
    }
}
