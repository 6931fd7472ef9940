//! Annotation data model: events, binary masks and their construction.

mod annotation;
mod builder;
mod event;

pub use annotation::Annotation;
pub use builder::AnnotationBuilder;
pub use event::Event;
