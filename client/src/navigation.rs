use std::rc::Rc;

/// Hard navigation out of the current view, used when the credential is
/// rejected by the API.
pub trait Navigator {
    fn redirect_to_login(&self);
}

impl<N: Navigator + ?Sized> Navigator for Rc<N> {
    fn redirect_to_login(&self) {
        (**self).redirect_to_login()
    }
}
