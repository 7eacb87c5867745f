//! Login and logout forms.

use pagedom::{generate_id, handler, Element, Event, EventKind, HandlerRegistry};

use super::SimpleAuthApi;
use crate::state::State;
use crate::validation::Rules;
use crate::widgets::{Alert, AlertKind, Button};

/// User/password form that logs the page's session in.
#[derive(Clone, Debug)]
pub struct LoginForm {
    id: String,
    auth: SimpleAuthApi,
    user: State<String>,
    password: State<String>,
    user_rules: Rules,
    alert: Alert,
}

impl LoginForm {
    pub fn new(auth: SimpleAuthApi) -> Self {
        Self {
            id: generate_id("login"),
            auth,
            user: State::default(),
            password: State::default(),
            user_rules: Rules::new().required("User name is required"),
            alert: Alert::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> String {
        format!("{}-user", self.id)
    }

    pub fn password_id(&self) -> String {
        format!("{}-password", self.id)
    }

    pub fn submit_id(&self) -> String {
        format!("{}-submit", self.id)
    }

    /// The alert showing the outcome of the last attempt.
    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    /// Try to log `session_id` in with the entered credentials.
    ///
    /// The outcome is shown in the form's alert; it is not an error of the
    /// handler.
    pub fn submit(&self, session_id: &str) -> bool {
        let user = self.user.get();
        let password = self.password.get();

        let result = self
            .user_rules
            .check(&user)
            .and_then(|()| self.auth.authenticate(&user, &password).map_err(|e| e.to_string()))
            .and_then(|()| self.auth.login(session_id, &user).map_err(|e| e.to_string()));

        match result {
            Ok(()) => {
                self.alert
                    .show(AlertKind::Success, format!("Welcome {user}"));
                self.password.set(String::new());
                true
            }
            Err(message) => {
                log::warn!("Login failed for session {session_id}: {message}");
                self.alert.show(AlertKind::Danger, message);
                false
            }
        }
    }

    pub fn build(&self, registry: &HandlerRegistry) -> Element {
        bind_input(registry, &self.user_id(), &self.user);
        bind_input(registry, &self.password_id(), &self.password);

        let form = self.clone();
        let submit = Button::new()
            .label("Login")
            .id(self.submit_id())
            .class("is-primary")
            .on_click(handler(move |event: Event, _page| {
                let form = form.clone();
                async move {
                    form.submit(&event.session_id);
                    Ok(())
                }
            }))
            .build(registry);

        Element::new("form")
            .id(&self.id)
            .child(self.alert.build(registry))
            .child(
                Element::input(self.user.get())
                    .id(self.user_id())
                    .attr("name", "user"),
            )
            .child(
                Element::input(String::new())
                    .id(self.password_id())
                    .attr("name", "password")
                    .attr("type", "password"),
            )
            .child(submit)
    }
}

/// A single button that logs the page's session out.
#[derive(Clone, Debug)]
pub struct LogoutForm {
    id: String,
    auth: SimpleAuthApi,
    alert: Alert,
}

impl LogoutForm {
    pub fn new(auth: SimpleAuthApi) -> Self {
        Self {
            id: generate_id("logout"),
            auth,
            alert: Alert::new(),
        }
    }

    pub fn submit_id(&self) -> String {
        format!("{}-submit", self.id)
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub fn submit(&self, session_id: &str) {
        match self.auth.logout(session_id) {
            Some(user) => self
                .alert
                .show(AlertKind::Info, format!("{user} logged out")),
            None => self.alert.show(AlertKind::Warning, "Not logged in"),
        }
    }

    pub fn build(&self, registry: &HandlerRegistry) -> Element {
        let form = self.clone();
        let submit = Button::new()
            .label("Logout")
            .id(self.submit_id())
            .on_click(handler(move |event: Event, _page| {
                let form = form.clone();
                async move {
                    form.submit(&event.session_id);
                    Ok(())
                }
            }))
            .build(registry);

        Element::div()
            .id(&self.id)
            .child(self.alert.build(registry))
            .child(submit)
    }
}

fn bind_input(registry: &HandlerRegistry, id: &str, state: &State<String>) {
    let state = state.clone();
    registry.register(
        id,
        EventKind::Change,
        handler(move |event: Event, _page| {
            let state = state.clone();
            async move {
                state.set(event.value_or_empty().to_string());
                Ok(())
            }
        }),
    );
}
