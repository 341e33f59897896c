use crate::schema::ShimConfig;

pub(crate) fn validate_content(errors: &mut Vec<String>, config: &ShimConfig) {
    let content = &config.content;
    if content.url.is_some() && content.html_file.is_some() {
        errors.push("content.url and content.html_file are mutually exclusive".into());
    }
    if let Some(url) = &content.url {
        if url.trim().is_empty() {
            errors.push("content.url must not be empty".into());
        }
        if url.contains('\0') {
            errors.push("content.url must not contain NUL".into());
        }
    }
}
