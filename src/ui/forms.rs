use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Internal representation of the login form fields.
#[derive(Default, Clone)]
pub(crate) struct LoginForm {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) active: LoginField,
    pub(crate) error: Option<String>,
}

/// Fields available within the login form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum LoginField {
    #[default]
    Username,
    Password,
}

impl LoginForm {
    /// Swap focus between the username and password fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    /// Append a character to the active field. Control characters are ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            LoginField::Username => self.username.push(ch),
            LoginField::Password => self.password.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    /// Clear the password after a failed attempt but keep the username.
    pub(crate) fn reject(&mut self, message: &str) {
        self.password.clear();
        self.active = LoginField::Password;
        self.error = Some(message.to_string());
    }

    /// Render a single line for the form widget. The password is masked.
    pub(crate) fn build_line(&self, field_name: &str, field: LoginField) -> Line<'static> {
        let (display, is_active, empty) = match field {
            LoginField::Username => (
                self.username.clone(),
                self.active == LoginField::Username,
                self.username.is_empty(),
            ),
            LoginField::Password => (
                "*".repeat(self.password.chars().count()),
                self.active == LoginField::Password,
                self.password.is_empty(),
            ),
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if empty {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    pub(crate) fn value_len(&self, field: LoginField) -> usize {
        match field {
            LoginField::Username => self.username.chars().count(),
            LoginField::Password => self.password.chars().count(),
        }
    }
}

/// Digits-only input for the number of winners to draw.
#[derive(Clone)]
pub(crate) struct CountInput {
    pub(crate) value: String,
}

impl Default for CountInput {
    fn default() -> Self {
        Self {
            value: "1".to_string(),
        }
    }
}

impl CountInput {
    /// Accept ASCII digits only, capped at four characters.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_ascii_digit() && self.value.len() < 4 {
            if self.value == "0" {
                self.value.clear();
            }
            self.value.push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    /// Parsed count; blank or zero input is rejected with a message.
    pub(crate) fn parse(&self) -> Result<usize, &'static str> {
        match self.value.trim().parse::<usize>() {
            Ok(0) => Err("Number of winners must be at least 1."),
            Ok(count) => Ok(count),
            Err(_) => Err("Enter how many winners to draw."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_routes_input_to_active_field() {
        let mut form = LoginForm::default();
        for ch in "admin".chars() {
            assert!(form.push_char(ch));
        }
        form.toggle_field();
        form.push_char('p');
        form.push_char('w');
        form.backspace();
        assert!(!form.push_char('\u{7}'));

        assert_eq!(form.username, "admin");
        assert_eq!(form.password, "p");
        assert_eq!(form.value_len(LoginField::Password), 1);
    }

    #[test]
    fn rejected_login_clears_password_only() {
        let mut form = LoginForm {
            username: "admin".into(),
            password: "nope".into(),
            ..LoginForm::default()
        };
        form.reject("Invalid username or password");

        assert_eq!(form.username, "admin");
        assert!(form.password.is_empty());
        assert!(form.active == LoginField::Password);
        assert_eq!(form.error.as_deref(), Some("Invalid username or password"));
    }

    #[test]
    fn count_input_accepts_digits_only() {
        let mut input = CountInput::default();
        assert!(!input.push_char('x'));
        input.backspace();
        assert!(input.parse().is_err());

        input.push_char('0');
        assert_eq!(input.parse(), Err("Number of winners must be at least 1."));
        input.push_char('3');
        assert_eq!(input.value, "3");
        assert_eq!(input.parse(), Ok(3));

        for ch in "9999".chars() {
            input.push_char(ch);
        }
        assert_eq!(input.value.len(), 4);
    }
}
