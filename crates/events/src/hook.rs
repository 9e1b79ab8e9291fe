//! Add-to-cart validation hooks.
//!
//! Before the storefront commits a pending add-to-cart it threads a pass/fail
//! verdict through every registered [`ValidationHook`]. Hooks run in ascending
//! priority; hooks with equal priority run in registration order. Each hook
//! receives the verdict returned by the previous one and returns the verdict
//! to hand on.
//!
//! The pending item is **not** part of cart state while hooks run.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use cartbundle_core::{ProductId, SessionId};

/// The pending add-to-cart being validated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A participant in add-to-cart validation.
pub trait ValidationHook: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Return the verdict for the pending add, given the verdict so far.
    fn validate(&self, passed: bool, request: &AddToCartRequest) -> bool;
}

impl<H> ValidationHook for Arc<H>
where
    H: ValidationHook + ?Sized,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn validate(&self, passed: bool, request: &AddToCartRequest) -> bool {
        (**self).validate(passed, request)
    }
}

struct RegisteredHook {
    priority: i32,
    hook: Arc<dyn ValidationHook>,
}

/// Ordered set of validation hooks.
#[derive(Default)]
pub struct ValidationPipeline {
    hooks: Vec<RegisteredHook>,
}

impl ValidationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook at `priority` (lower runs first).
    pub fn register(&mut self, priority: i32, hook: Arc<dyn ValidationHook>) {
        // Insert after every hook with priority <= ours to keep ties in registration order.
        let at = self.hooks.partition_point(|h| h.priority <= priority);
        self.hooks.insert(at, RegisteredHook { priority, hook });
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Hook names in execution order.
    pub fn hook_names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|h| h.hook.name()).collect()
    }

    /// Thread `passed` through every hook and return the final verdict.
    pub fn run(&self, passed: bool, request: &AddToCartRequest) -> bool {
        self.hooks.iter().fold(passed, |verdict, registered| {
            let next = registered.hook.validate(verdict, request);
            if next != verdict {
                tracing::debug!(
                    hook = registered.hook.name(),
                    priority = registered.priority,
                    session_id = %request.session_id,
                    product_id = %request.product_id,
                    verdict = next,
                    "validation hook changed verdict"
                );
            }
            next
        })
    }
}

impl core::fmt::Debug for ValidationPipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|h| (h.priority, h.hook.name())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        result: Option<bool>,
    }

    impl ValidationHook for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn validate(&self, passed: bool, _request: &AddToCartRequest) -> bool {
            self.log.lock().unwrap().push(self.name);
            self.result.unwrap_or(passed)
        }
    }

    fn request() -> AddToCartRequest {
        AddToCartRequest {
            session_id: SessionId::new(),
            product_id: ProductId::new(7).unwrap(),
            quantity: 1,
        }
    }

    fn recorder(
        name: &'static str,
        log: &Arc<Mutex<Vec<&'static str>>>,
        result: Option<bool>,
    ) -> Arc<dyn ValidationHook> {
        Arc::new(Recorder {
            name,
            log: Arc::clone(log),
            result,
        })
    }

    #[test]
    fn empty_pipeline_returns_initial_verdict() {
        let pipeline = ValidationPipeline::new();
        assert!(pipeline.is_empty());
        assert!(pipeline.run(true, &request()));
        assert!(!pipeline.run(false, &request()));
    }

    #[test]
    fn hooks_run_by_priority_then_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = ValidationPipeline::new();
        pipeline.register(20, recorder("late", &log, None));
        pipeline.register(10, recorder("early", &log, None));
        pipeline.register(20, recorder("late-second", &log, None));

        assert_eq!(pipeline.hook_names(), vec!["early", "late", "late-second"]);
        pipeline.run(true, &request());
        assert_eq!(*log.lock().unwrap(), vec!["early", "late", "late-second"]);
    }

    #[test]
    fn each_hook_sees_previous_verdict() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = ValidationPipeline::new();
        pipeline.register(10, recorder("reject", &log, Some(false)));
        pipeline.register(20, recorder("passthrough", &log, None));

        assert!(!pipeline.run(true, &request()));
        assert_eq!(pipeline.len(), 2);
    }
}
