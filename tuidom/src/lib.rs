pub mod buffer;
pub mod element;
pub mod event;
pub mod focus;
pub mod hit;
pub mod layout;
pub mod render;
pub mod terminal;
pub mod text;
pub mod types;

pub use buffer::{Buffer, Cell};
pub use element::{find_element, find_path, Content, Element};
pub use event::{convert_event, Event, Key, Modifiers, MouseButton};
pub use focus::{collect_focusable, collect_visible_focusable, FocusState};
pub use hit::{hit_test, hit_test_any, hit_test_focusable};
pub use layout::{layout, measure, LayoutResult, Rect};
pub use render::render_to_buffer;
pub use terminal::Terminal;
pub use types::*;
