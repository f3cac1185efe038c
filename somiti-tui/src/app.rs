//! The role editor page and its event loop.

use std::sync::Arc;

use crossterm::event::EventStream;
use futures::StreamExt;
use log::{debug, info};
use multiselect::prelude::*;
use multiselect::{Palette, events};
use tuidom::{
    Edges, Element, Event, Key, LayoutResult, Rgb, Size, Style, Terminal, convert_event,
};

use crate::error::AppError;
use crate::fixture::{Role, RoleFixture};
use crate::form::RolePermissionsForm;

const SELECT_ID: &str = "permissions";
const SAVE_ID: &str = "save";

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Page editing the permissions granted to one role.
///
/// Owns the selection; the multi-select only reports changes.
pub struct RoleEditor {
    role: Role,
    candidates: Vec<Candidate>,
    permissions: State<Vec<String>>,
    select: MultiSelectState,
    status: State<Option<String>>,
    submitted: State<Option<RolePermissionsForm>>,
    registry: HandlerRegistry,
    dispatcher: Dispatcher,
}

impl RoleEditor {
    pub fn new(fixture: RoleFixture) -> Self {
        let permissions = State::new(fixture.role.permission_ids.clone());
        Self {
            role: fixture.role,
            candidates: fixture.permissions,
            permissions,
            select: MultiSelectState::new(),
            status: State::new(None),
            submitted: State::new(None),
            registry: HandlerRegistry::new(),
            dispatcher: Dispatcher::new(),
        }
    }

    pub fn permissions(&self) -> Vec<String> {
        self.permissions.get()
    }

    pub fn submitted(&self) -> Option<RolePermissionsForm> {
        self.submitted.get()
    }

    pub fn status(&self) -> Option<String> {
        self.status.get()
    }

    /// Build the page and register its handlers.
    pub fn element(&mut self) -> Result<Element, AppError> {
        self.registry.clear();
        let palette = Palette::default();

        let permissions = self.permissions.clone();
        let status = self.status.clone();
        let select = MultiSelect::new(SELECT_ID)
            .values(self.permissions())
            .on_values_change(move |next| {
                debug!("RoleEditor: permissions -> {next:?}");
                permissions.set(next);
                status.set(None);
            })
            .width(60)
            .palette(palette)
            .trigger(
                Trigger::new()
                    .placeholder("Select permissions...")
                    .clear(ClearControl::new().label("clear all")),
            )
            .content(Content::new(
                ListSurface::new()
                    .search_placeholder("Search permissions...")
                    .empty_message("No permissions match.")
                    .items(self.candidates.iter().cloned().map(Item::from)),
            ))
            .build(&self.select, &self.registry)?;

        let save = Element::text("[ Save ]")
            .id(SAVE_ID)
            .clickable(true)
            .focusable(true)
            .style(Style::new().foreground(palette.accent))
            .style_focused(Style::new().background(palette.focused).foreground(Rgb::WHITE));
        let submit = self.submit_handler();
        self.registry.register(
            SAVE_ID,
            events::ACTIVATE,
            Arc::new(move |_| {
                submit();
                EventResult::Consumed
            }),
        );

        let mut page = Element::col()
            .id("page")
            .width(Size::Fill)
            .padding(Edges::all(1))
            .gap(1)
            .style(Style::new().foreground(palette.text))
            .child(Element::text(format!("Role: {}", self.role.name)).style(Style::new().bold()))
            .child(
                Element::col()
                    .id("permissions-field")
                    .child(
                        Element::text("Permissions")
                            .style(Style::new().foreground(palette.text_muted)),
                    )
                    .child(select),
            )
            .child(save);

        if let Some(message) = self.status() {
            page = page.child(
                Element::text(message)
                    .id("status")
                    .style(Style::new().foreground(Rgb::new(224, 108, 117))),
            );
        }

        Ok(page.child(
            Element::text("Tab focus · Enter toggle · Esc close · Ctrl+S save · Ctrl+Q quit")
                .style(Style::new().dim()),
        ))
    }

    fn submit_handler(&self) -> Arc<dyn Fn() + Send + Sync> {
        let role_id = self.role.id.clone();
        let permissions = self.permissions.clone();
        let status = self.status.clone();
        let submitted = self.submitted.clone();
        Arc::new(
            move || match RolePermissionsForm::validate(&role_id, &permissions.get()) {
                Ok(form) => {
                    info!("RoleEditor: submitting {} permissions", form.permission_ids.len());
                    submitted.set(Some(form));
                }
                Err(err) => status.set(Some(err.to_string())),
            },
        )
    }

    /// Prepare a freshly built tree for rendering.
    pub fn prepare(&mut self, root: &mut Element) {
        self.dispatcher.prepare(root);
    }

    pub fn handle_event(&mut self, root: &Element, layout: &LayoutResult, event: &Event) -> Flow {
        match event {
            Event::Key { key: Key::Char('q'), modifiers } if modifiers.ctrl => return Flow::Quit,
            Event::Key { key: Key::Char('s'), modifiers } if modifiers.ctrl => {
                (self.submit_handler())();
                return Flow::Continue;
            }
            _ => {}
        }

        let result = self.dispatcher.dispatch(root, layout, &self.registry, event);
        debug!("RoleEditor: {event:?} -> {result:?}");
        Flow::Continue
    }

    /// Run until the form is submitted or the user quits.
    pub async fn run(mut self) -> Result<Option<RolePermissionsForm>, AppError> {
        let mut terminal = Terminal::new()?;
        let mut events = EventStream::new();
        let (width, height) = terminal.size();
        info!("RoleEditor: editing {} on a {width}x{height} terminal", self.role.name);
        self.dispatcher.focus(&format!("{SELECT_ID}-trigger"));

        loop {
            let mut root = self.element()?;
            self.prepare(&mut root);
            terminal.render(&root)?;
            let layout = terminal.layout().clone();

            if let Some(form) = self.submitted() {
                return Ok(Some(form));
            }

            let Some(next) = events.next().await else {
                return Ok(None);
            };
            let Some(event) = convert_event(next?) else {
                continue;
            };
            if self.handle_event(&root, &layout, &event) == Flow::Quit {
                info!("RoleEditor: quit without saving");
                return Ok(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tuidom::{Modifiers, Rect, layout};

    use super::*;

    fn editor() -> RoleEditor {
        RoleEditor::new(RoleFixture::load(None).unwrap())
    }

    fn frame(editor: &mut RoleEditor) -> (Element, LayoutResult) {
        let mut root = editor.element().unwrap();
        editor.prepare(&mut root);
        let layout = layout(&root, Rect::from_size(100, 30));
        (root, layout)
    }

    fn send(editor: &mut RoleEditor, event: Event) -> Flow {
        let (root, layout) = frame(editor);
        editor.handle_event(&root, &layout, &event)
    }

    fn click(editor: &mut RoleEditor, id: &str) {
        let (root, layout) = frame(editor);
        let rect = layout[id];
        editor.handle_event(&root, &layout, &Event::click(rect.x, rect.y));
    }

    fn ctrl(c: char) -> Event {
        Event::Key {
            key: Key::Char(c),
            modifiers: Modifiers::ctrl(),
        }
    }

    #[test]
    fn test_starts_with_granted_permissions() {
        let mut editor = editor();
        let (root, _) = frame(&mut editor);

        assert_eq!(editor.permissions(), vec!["tickets.read", "tickets.reply"]);
        assert!(tuidom::find_element(&root, "permissions-badge-1").is_some());
    }

    #[test]
    fn test_adding_a_permission_and_saving() {
        let mut editor = editor();

        click(&mut editor, "permissions-trigger");
        click(&mut editor, "permissions-item-0");
        send(&mut editor, Event::key(Key::Escape));
        click(&mut editor, SAVE_ID);

        assert_eq!(
            editor.submitted(),
            Some(RolePermissionsForm {
                role_id: "role-support".into(),
                permission_ids: vec![
                    "tickets.read".into(),
                    "tickets.reply".into(),
                    "users.read".into(),
                ],
            })
        );
    }

    #[test]
    fn test_saving_empty_selection_shows_error() {
        let mut editor = editor();

        click(&mut editor, "permissions-clear");
        send(&mut editor, ctrl('s'));

        assert!(editor.permissions().is_empty());
        assert_eq!(editor.submitted(), None);
        assert_eq!(editor.status().as_deref(), Some("Select at least one permission"));

        let (root, _) = frame(&mut editor);
        assert!(tuidom::find_element(&root, "status").is_some());
    }

    #[test]
    fn test_changing_selection_clears_error() {
        let mut editor = editor();
        click(&mut editor, "permissions-clear");
        send(&mut editor, ctrl('s'));

        click(&mut editor, "permissions-trigger");
        click(&mut editor, "permissions-item-3");

        assert_eq!(editor.status(), None);
        assert_eq!(editor.permissions(), vec!["tickets.read"]);
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut editor = editor();
        assert_eq!(send(&mut editor, ctrl('q')), Flow::Quit);
        assert_eq!(send(&mut editor, Event::key(Key::Char('q'))), Flow::Continue);
    }
}
