use std::collections::HashMap;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};

use crate::handlers::Action;
use crate::users::ProfileUpdate;

/// User-facing message, shown the way a browser `alert` would.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

impl Alert {
    pub fn new(message: impl Into<String>) -> Self {
        Alert { message: message.into() }
    }
}

/// A file handed to the user for saving.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub content_type: String,
    pub body: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    TextArea,
    Search,
    /// Image picker; the host reads the file and puts a data URL in the field.
    Image,
}

/// Which action a submitted form turns into.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum FormKind {
    Search,
    Comment { post_id: String },
    Publish,
    SaveProfile,
}

impl FormKind {
    /// Builds the action from the form's field values, keyed by input name.
    pub fn to_action(&self, fields: &HashMap<String, String>) -> Action {
        let field = |name: &str| fields.get(name).cloned().unwrap_or_default();
        let optional = |name: &str| fields.get(name).filter(|v| !v.is_empty()).cloned();
        match self {
            FormKind::Search => Action::Search { query: field("query") },
            FormKind::Comment { post_id } => Action::Comment {
                post_id: post_id.clone(),
                text: field("text"),
            },
            FormKind::Publish => Action::Publish {
                text: field("text"),
                image: field("image"),
            },
            FormKind::SaveProfile => Action::SaveProfile(ProfileUpdate {
                name: optional("name"),
                bio: optional("bio"),
                avatar: optional("avatar"),
            }),
        }
    }
}

/// Rendered UI tree. Rebuilt from scratch after every action.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    Container { class: String, children: Vec<Widget> },
    Text { class: String, text: String },
    /// Markup that was sanitized when it was built.
    Markup { class: String, html: String },
    Image { class: String, src: String },
    Button { class: String, label: String, action: Action },
    Input { kind: InputKind, name: String, value: String, placeholder: String },
    Form { class: String, kind: FormKind, children: Vec<Widget> },
    /// Submits the enclosing form.
    Submit { label: String },
}

impl Widget {
    pub fn container(class: &str, children: Vec<Widget>) -> Self {
        Widget::Container { class: class.to_string(), children }
    }

    pub fn text(class: &str, text: impl Into<String>) -> Self {
        Widget::Text { class: class.to_string(), text: text.into() }
    }

    pub fn image(class: &str, src: impl Into<String>) -> Self {
        Widget::Image { class: class.to_string(), src: src.into() }
    }

    pub fn button(class: &str, label: impl Into<String>, action: Action) -> Self {
        Widget::Button { class: class.to_string(), label: label.into(), action }
    }

    pub fn input(kind: InputKind, name: &str, value: &str, placeholder: &str) -> Self {
        Widget::Input {
            kind,
            name: name.to_string(),
            value: value.to_string(),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn form(class: &str, kind: FormKind, children: Vec<Widget>) -> Self {
        Widget::Form { class: class.to_string(), kind, children }
    }

    pub fn submit(label: &str) -> Self {
        Widget::Submit { label: label.to_string() }
    }

    pub fn children(&self) -> &[Widget] {
        match self {
            Widget::Container { children, .. } | Widget::Form { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first search by class.
    pub fn find_by_class(&self, wanted: &str) -> Vec<&Widget> {
        let mut found = Vec::new();
        self.collect_by_class(wanted, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, wanted: &str, found: &mut Vec<&'a Widget>) {
        let own = match self {
            Widget::Container { class, .. }
            | Widget::Text { class, .. }
            | Widget::Markup { class, .. }
            | Widget::Image { class, .. }
            | Widget::Button { class, .. }
            | Widget::Form { class, .. } => Some(class.as_str()),
            Widget::Input { .. } | Widget::Submit { .. } => None,
        };
        if own.is_some_and(|c| c.split(' ').any(|c| c == wanted)) {
            found.push(self);
        }
        for child in self.children() {
            child.collect_by_class(wanted, found);
        }
    }

    /// All button actions in the tree, in document order.
    pub fn actions(&self) -> Vec<&Action> {
        let mut actions = Vec::new();
        self.collect_actions(&mut actions);
        actions
    }

    fn collect_actions<'a>(&'a self, actions: &mut Vec<&'a Action>) {
        if let Widget::Button { action, .. } = self {
            actions.push(action);
        }
        for child in self.children() {
            child.collect_actions(actions);
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Widget::Container { class, children } => {
                out.push_str(&format!(r#"<div class="{}">"#, encode_double_quoted_attribute(class)));
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</div>");
            }
            Widget::Text { class, text } => {
                out.push_str(&format!(
                    r#"<span class="{}">{}</span>"#,
                    encode_double_quoted_attribute(class),
                    encode_text(text)
                ));
            }
            Widget::Markup { class, html } => {
                out.push_str(&format!(r#"<div class="{}">{}</div>"#, encode_double_quoted_attribute(class), html));
            }
            Widget::Image { class, src } => {
                out.push_str(&format!(
                    r#"<img class="{}" src="{}" />"#,
                    encode_double_quoted_attribute(class),
                    encode_double_quoted_attribute(src)
                ));
            }
            Widget::Button { class, label, action } => {
                let action = serde_json::to_string(action).unwrap_or_default();
                out.push_str(&format!(
                    r#"<button class="{}" data-action="{}">{}</button>"#,
                    encode_double_quoted_attribute(class),
                    encode_double_quoted_attribute(&action),
                    encode_text(label)
                ));
            }
            Widget::Input { kind, name, value, placeholder } => {
                let name = encode_double_quoted_attribute(name);
                let placeholder = encode_double_quoted_attribute(placeholder);
                match kind {
                    InputKind::TextArea => out.push_str(&format!(
                        r#"<textarea name="{}" placeholder="{}">{}</textarea>"#,
                        name,
                        placeholder,
                        encode_text(value)
                    )),
                    InputKind::Image => out.push_str(&format!(
                        r#"<input type="file" accept="image/*" name="{}" />"#,
                        name
                    )),
                    InputKind::Text | InputKind::Search => out.push_str(&format!(
                        r#"<input type="{}" name="{}" value="{}" placeholder="{}" />"#,
                        if *kind == InputKind::Search { "search" } else { "text" },
                        name,
                        encode_double_quoted_attribute(value),
                        placeholder
                    )),
                }
            }
            Widget::Form { class, kind, children } => {
                let kind = serde_json::to_string(kind).unwrap_or_default();
                out.push_str(&format!(
                    r#"<form class="{}" data-form="{}">"#,
                    encode_double_quoted_attribute(class),
                    encode_double_quoted_attribute(&kind)
                ));
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</form>");
            }
            Widget::Submit { label } => {
                out.push_str(&format!(r#"<button type="submit">{}</button>"#, encode_text(label)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_escaped_in_html() {
        let html = Widget::text("name", "<b>Lex</b> & co").to_html();
        assert_eq!(html, r#"<span class="name">&lt;b&gt;Lex&lt;/b&gt; &amp; co</span>"#);
    }

    #[test]
    fn buttons_carry_their_action_as_json() {
        let button = Widget::button("icon-btn", "Like", Action::Like { post_id: "p\"1".into() });
        let html = button.to_html();
        assert!(html.contains(r#"data-action="{&quot;op&quot;:&quot;like&quot;,&quot;post_id&quot;:&quot;p\&quot;1&quot;}""#));
    }

    #[test]
    fn comment_form_builds_a_comment_action() {
        let kind = FormKind::Comment { post_id: "p1".into() };
        let fields = HashMap::from([("text".to_string(), "nice".to_string())]);
        assert_eq!(
            kind.to_action(&fields),
            Action::Comment { post_id: "p1".into(), text: "nice".into() }
        );
    }

    #[test]
    fn blank_profile_fields_become_none() {
        let fields = HashMap::from([
            ("name".to_string(), "Mia".to_string()),
            ("bio".to_string(), String::new()),
        ]);
        assert_eq!(
            FormKind::SaveProfile.to_action(&fields),
            Action::SaveProfile(ProfileUpdate { name: Some("Mia".into()), bio: None, avatar: None })
        );
    }

    #[test]
    fn find_by_class_matches_any_class_token() {
        let tree = Widget::container(
            "feed",
            vec![Widget::text("post-text big", "a"), Widget::text("post-text", "b")],
        );
        assert_eq!(tree.find_by_class("post-text").len(), 2);
        assert_eq!(tree.find_by_class("big").len(), 1);
    }
}
