use console::style;

pub enum Style {
    Link,    // URLs and graph refs
    Command, // Commands, flags, env variable keys, and profile names
    Failure,
    Path,        // File paths
    InfoPrefix,  // "==>" text
    ErrorPrefix, // "error:" and "error[code]:" text
    Success,
}

impl Style {
    pub fn paint<S: AsRef<str>>(&self, message: S) -> String {
        let message_ref = message.as_ref();

        if is_no_color_set() {
            return message_ref.to_string();
        }

        match &self {
            Style::Link => style(message_ref).cyan(),
            Style::Command => style(message_ref).yellow(),
            Style::Failure => style(message_ref).red(),
            Style::InfoPrefix => style(message_ref).blue().bold(),
            Style::ErrorPrefix => style(message_ref).red().bold(),
            Style::Path => style(message_ref).bold(),
            Style::Success => style(message_ref).green(),
        }
        .to_string()
    }
}

pub fn is_no_color_set() -> bool {
    is_bool_env_var_set("NO_COLOR") || is_bool_env_var_set("APOLLO_NO_COLOR")
}

fn is_bool_env_var_set(key: &str) -> bool {
    !matches!(
        std::env::var(key).as_deref(),
        Err(..) | Ok("") | Ok("0") | Ok("false") | Ok("False") | Ok("FALSE")
    )
}
