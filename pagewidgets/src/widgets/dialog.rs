//! Modal dialogs: a password prompt and a simple alert dialog.

use pagedom::{generate_id, handler, Element, EventKind, Handler, HandlerRegistry};

use super::Button;
use crate::state::State;

#[derive(Debug, Clone, Default)]
struct DialogState {
    open: bool,
    user: String,
    password: String,
    password_visible: bool,
}

/// A user/password prompt with login and cancel buttons.
///
/// Input changes are tracked in the dialog state. Both buttons close the
/// dialog; the login handler reads [`credentials`](Self::credentials).
#[derive(Clone)]
pub struct PasswordDialog {
    id: String,
    state: State<DialogState>,
    on_login: Option<Handler>,
}

impl Default for PasswordDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordDialog {
    pub fn new() -> Self {
        Self {
            id: generate_id("password-dialog"),
            state: State::default(),
            on_login: None,
        }
    }

    pub fn on_login(mut self, handler: Handler) -> Self {
        self.on_login = Some(handler);
        self
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

    pub fn visibility_id(&self) -> String {
        format!("{}-visibility", self.id)
    }

    pub fn login_id(&self) -> String {
        format!("{}-login", self.id)
    }

    pub fn cancel_id(&self) -> String {
        format!("{}-cancel", self.id)
    }

    pub fn open(&self) {
        self.state.update(|s| s.open = true);
    }

    pub fn close(&self) {
        self.state.update(|s| s.open = false);
    }

    pub fn is_open(&self) -> bool {
        self.state.read(|s| s.open)
    }

    /// Entered user name and password.
    pub fn credentials(&self) -> (String, String) {
        self.state.read(|s| (s.user.clone(), s.password.clone()))
    }

    pub fn is_password_visible(&self) -> bool {
        self.state.read(|s| s.password_visible)
    }

    /// Switch the password input between masked and plain text.
    pub fn toggle_visibility(&self) -> bool {
        self.state.update(|s| {
            s.password_visible = !s.password_visible;
            s.password_visible
        })
    }

    pub fn build(&self, registry: &HandlerRegistry) -> Element {
        let state = self.state.get();

        let this = self.clone();
        registry.register(
            &self.user_id(),
            EventKind::Change,
            handler(move |event, _page| {
                let this = this.clone();
                async move {
                    let user = event.value_or_empty().to_string();
                    this.state.update(|s| s.user = user);
                    Ok(())
                }
            }),
        );
        let this = self.clone();
        registry.register(
            &self.password_id(),
            EventKind::Change,
            handler(move |event, _page| {
                let this = this.clone();
                async move {
                    let password = event.value_or_empty().to_string();
                    this.state.update(|s| s.password = password);
                    Ok(())
                }
            }),
        );
        let this = self.clone();
        registry.register(
            &self.visibility_id(),
            EventKind::Click,
            handler(move |_event, _page| {
                let this = this.clone();
                async move {
                    this.toggle_visibility();
                    Ok(())
                }
            }),
        );

        let this = self.clone();
        let on_login = self.on_login.clone();
        let login = Button::new()
            .label("Login")
            .id(self.login_id())
            .class("is-primary")
            .on_click(handler(move |event, page| {
                let this = this.clone();
                let on_login = on_login.clone();
                async move {
                    this.close();
                    match on_login {
                        Some(on_login) => on_login(event, page).await,
                        None => Ok(()),
                    }
                }
            }))
            .build(registry);

        let this = self.clone();
        let cancel = Button::new()
            .label("Cancel")
            .id(self.cancel_id())
            .on_click(handler(move |_event, _page| {
                let this = this.clone();
                async move {
                    this.close();
                    Ok(())
                }
            }))
            .build(registry);

        let (password_type, icon) = if state.password_visible {
            ("text", "visibility")
        } else {
            ("password", "visibility_off")
        };

        Element::div()
            .id(&self.id)
            .class("modal")
            .hidden(!state.open)
            .child(
                Element::new("form")
                    .child(Element::input(state.user).id(self.user_id()).attr("name", "user"))
                    .child(
                        Element::input(state.password)
                            .id(self.password_id())
                            .attr("name", "password")
                            .attr("type", password_type),
                    )
                    .child(
                        Element::new("i")
                            .id(self.visibility_id())
                            .class("icon")
                            .data("icon", icon),
                    ),
            )
            .child(Element::div().class("modal-actions").child(login).child(cancel))
    }
}

impl std::fmt::Debug for PasswordDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordDialog")
            .field("id", &self.id)
            .field("open", &self.is_open())
            .finish()
    }
}

/// A dialog showing a title, some text, and an OK button.
#[derive(Clone, Debug)]
pub struct AlertDialog {
    id: String,
    state: State<(bool, String, String)>,
}

impl Default for AlertDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertDialog {
    pub fn new() -> Self {
        Self {
            id: generate_id("alert-dialog"),
            state: State::new((false, "Alert".to_string(), String::new())),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ok_id(&self) -> String {
        format!("{}-ok", self.id)
    }

    /// Open the dialog with a title and content.
    pub fn show(&self, title: impl Into<String>, content: impl Into<String>) {
        self.state.set((true, title.into(), content.into()));
    }

    pub fn close(&self) {
        self.state.update(|s| s.0 = false);
    }

    pub fn is_open(&self) -> bool {
        self.state.read(|s| s.0)
    }

    pub fn build(&self, registry: &HandlerRegistry) -> Element {
        let (open, title, content) = self.state.get();
        let this = self.clone();
        let ok = Button::new()
            .label("OK")
            .id(self.ok_id())
            .on_click(handler(move |_event, _page| {
                let this = this.clone();
                async move {
                    this.close();
                    Ok(())
                }
            }))
            .build(registry);

        Element::div()
            .id(&self.id)
            .class("modal")
            .hidden(!open)
            .child(Element::div().class("modal-title").child(Element::text(title)))
            .child(Element::div().class("modal-content").child(Element::text(content)))
            .child(ok)
    }
}
