use std::ops::Deref;
use std::rc::Rc;

use crate::render::RenderSession;

mod header;
mod studio;

pub use header::AppHeader;
pub use studio::Studio;

/// Context handle for the page's render session. Components compare by
/// identity, never by content.
#[derive(Clone)]
pub struct SessionHandle(Rc<RenderSession>);

impl SessionHandle {
    pub fn new(session: RenderSession) -> Self {
        Self(Rc::new(session))
    }
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SessionHandle {
    type Target = RenderSession;

    fn deref(&self) -> &RenderSession {
        &self.0
    }
}
