use crate::trigger::error::HandlerError;
use crate::trigger::record::Record;

/// Business logic reacting to record lifecycle notifications.
///
/// Every lifecycle method defaults to a no-op; implementations override only the
/// combinations they care about. A handler is built fresh for each notification and
/// borrowed by the dispatcher for the duration of one call.
pub trait TriggerHandler<R = Record> {
    /// Handler name for logging and settings lookups
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Disablement gate, checked before any lifecycle method runs. Must not have side effects.
    fn is_disabled(&self) -> bool {
        false
    }

    fn before_insert(&mut self, _new: &[R]) -> Result<(), HandlerError> {
        Ok(())
    }

    fn before_update(&mut self, _old: &[R], _new: &[R]) -> Result<(), HandlerError> {
        Ok(())
    }

    fn before_delete(&mut self, _old: &[R]) -> Result<(), HandlerError> {
        Ok(())
    }

    fn after_insert(&mut self, _new: &[R]) -> Result<(), HandlerError> {
        Ok(())
    }

    fn after_update(&mut self, _old: &[R], _new: &[R]) -> Result<(), HandlerError> {
        Ok(())
    }

    fn after_delete(&mut self, _old: &[R]) -> Result<(), HandlerError> {
        Ok(())
    }

    fn after_undelete(&mut self, _new: &[R]) -> Result<(), HandlerError> {
        Ok(())
    }
}

impl<R, H: TriggerHandler<R> + ?Sized> TriggerHandler<R> for Box<H> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }

    fn before_insert(&mut self, new: &[R]) -> Result<(), HandlerError> {
        (**self).before_insert(new)
    }

    fn before_update(&mut self, old: &[R], new: &[R]) -> Result<(), HandlerError> {
        (**self).before_update(old, new)
    }

    fn before_delete(&mut self, old: &[R]) -> Result<(), HandlerError> {
        (**self).before_delete(old)
    }

    fn after_insert(&mut self, new: &[R]) -> Result<(), HandlerError> {
        (**self).after_insert(new)
    }

    fn after_update(&mut self, old: &[R], new: &[R]) -> Result<(), HandlerError> {
        (**self).after_update(old, new)
    }

    fn after_delete(&mut self, old: &[R]) -> Result<(), HandlerError> {
        (**self).after_delete(old)
    }

    fn after_undelete(&mut self, new: &[R]) -> Result<(), HandlerError> {
        (**self).after_undelete(new)
    }
}
