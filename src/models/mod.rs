pub mod item;

pub use item::{ContainerRef, Item, MenuAction, Verb};
