use super::LlmMessage;

pub struct LanguageServiceArguments<'arg> {
    pub messages: &'arg [LlmMessage],
    pub model: &'arg str,
    pub temperature: f32,
    pub max_tokens: u16,
}
