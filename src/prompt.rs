use crate::config::PromptStyle;

/// Builds the single-turn instruction sent to the translation model.
pub fn translation_prompt(style: PromptStyle, text: &str, source: &str, target: &str) -> String {
    match style {
        PromptStyle::Business => format!(
            "You are a professional translator. Translate the following text from \"{source}\" \
             to \"{target}\" so that it reads naturally, is easy to understand, and suits \
             business use. If the text is an announcement or advertisement, make it sound \
             appealing. Reply with the translation only. Text to translate: \"{text}\""
        ),
        PromptStyle::Faithful => format!(
            "Translate the following text from \"{source}\" to \"{target}\". Keep the meaning \
             faithful and choose wording that fits the context. Reply with the translation \
             only. Text to translate: \"{text}\""
        ),
    }
}
