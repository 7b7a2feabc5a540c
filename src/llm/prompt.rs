use crate::hooks::{HookRequest, Platform, Tone};

const SYSTEM_PROMPT_HEADER: &str = r#"You are a viral content strategist who helps creators write high-converting hook lines. Generate 5 diverse hooks for the given topic.

Rules:
1. Each hook must be under 20 words
2. Use curiosity, emotional contrast, storytelling, or surprise
3. Avoid clichés and generic hooks
4. Vary formats across the 5 hooks:
   - Bold statement
   - Relatable insight
   - Contrarian opinion
   - Personal story teaser
   - Open-ended question
5. Never repeat phrases
"#;

pub fn system_prompt(platform: Platform, tone: Tone) -> String {
    format!(
        "{SYSTEM_PROMPT_HEADER}6. Adapt to the platform style ({platform}) and tone ({tone})\n\
         7. Make it feel human and authentic"
    )
}

/// The topic goes in verbatim; it is not escaped or trimmed.
pub fn user_prompt(request: &HookRequest) -> String {
    format!(
        "Generate 5 hooks for topic: {}. Platform: {}. Tone: {}",
        request.topic, request.platform, request.tone
    )
}
