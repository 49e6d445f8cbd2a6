//! Decoding of the submitted config form.

use std::collections::HashMap;

use anyhow::Context;
use url::form_urlencoded;

use crate::app::store::StationConfig;

pub const TALKGROUP_FIELD: &str = "deftg";
pub const TIMEOUT_FIELD: &str = "defto";
pub const VOICE_PROMPTS_FIELD: &str = "voiceprompts";
pub const COURTESY_TONE_FIELD: &str = "ctone";
pub const LOCAL_COURTESY_TONE_FIELD: &str = "lctone";

/// Decodes an `application/x-www-form-urlencoded` body.
///
/// Talkgroup and timeout are required and must be integers. Checkboxes are
/// on only when submitted with the value `on`; browsers omit unchecked ones.
pub fn parse_form(body: &[u8]) -> anyhow::Result<StationConfig> {
    let fields: HashMap<String, String> = form_urlencoded::parse(body).into_owned().collect();

    let talkgroup = fields
        .get(TALKGROUP_FIELD)
        .with_context(|| format!("missing form field {TALKGROUP_FIELD}"))?
        .trim();
    talkgroup
        .parse::<i32>()
        .with_context(|| format!("talkgroup is not a number: {talkgroup:?}"))?;

    let timeout = fields
        .get(TIMEOUT_FIELD)
        .with_context(|| format!("missing form field {TIMEOUT_FIELD}"))?
        .trim();
    let timeout = timeout
        .parse::<u32>()
        .with_context(|| format!("timeout is not a number: {timeout:?}"))?;

    let checked = |name: &str| fields.get(name).is_some_and(|v| v == "on");

    Ok(StationConfig {
        default_talkgroup: talkgroup.to_string(),
        default_timeout: timeout,
        use_voice_prompts: checked(VOICE_PROMPTS_FIELD),
        use_courtesy_tone: checked(COURTESY_TONE_FIELD),
        use_local_courtesy_tone: checked(LOCAL_COURTESY_TONE_FIELD),
    })
}
