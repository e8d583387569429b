//! Lazily materialized UI component references.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Serialize, Serializer};
use tokio::sync::OnceCell;

/// A renderable unit contributed by a module (tab body, action dialog, view).
///
/// The shell never renders; it only hands the resolved component to the
/// rendering layer, which downcasts through `as_any`.
pub trait Component: Send + Sync + 'static {
    fn name(&self) -> &str;
    fn as_any(&self) -> &dyn Any;
}

/// Declares a unit [`Component`] with a fixed name.
///
/// ```ignore
/// shellkit::component!(TicketList, "tickets/list");
/// let list = ComponentRef::of::<TicketList>("tickets/list");
/// ```
#[macro_export]
macro_rules! component {
    ($(#[$meta:meta])* $ty:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $ty;

        impl $crate::Component for $ty {
            fn name(&self) -> &str {
                $name
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}

type ComponentFactory =
    Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<Arc<dyn Component>>> + Send + Sync>;

/// Deferred reference to a [`Component`].
///
/// The factory runs at most once, on the first successful [`resolve`](Self::resolve);
/// clones share the memoized result.
#[derive(Clone)]
pub struct ComponentRef {
    key: Arc<str>,
    factory: ComponentFactory,
    resolved: Arc<OnceCell<Arc<dyn Component>>>,
}

impl ComponentRef {
    #[must_use]
    pub fn new<F, Fut>(key: impl Into<Arc<str>>, make: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Arc<dyn Component>>> + Send + 'static,
    {
        let factory: ComponentFactory = Arc::new(
            move || -> BoxFuture<'static, anyhow::Result<Arc<dyn Component>>> { Box::pin(make()) },
        );
        Self {
            key: key.into(),
            factory,
            resolved: Arc::new(OnceCell::new()),
        }
    }

    /// Reference to a component type constructed through `Default` on first use.
    #[must_use]
    pub fn of<C: Component + Default>(key: impl Into<Arc<str>>) -> Self {
        Self::new(key, || async {
            let component: Arc<dyn Component> = Arc::new(C::default());
            Ok(component)
        })
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.initialized()
    }

    /// Materialize the component, running the factory on first call only.
    ///
    /// A failed factory leaves the reference unresolved so a later call can retry.
    ///
    /// # Errors
    /// Returns the factory's error.
    pub async fn resolve(&self) -> anyhow::Result<Arc<dyn Component>> {
        self.resolved
            .get_or_try_init(|| (self.factory)())
            .await
            .cloned()
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRef")
            .field("key", &self.key)
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}

impl Serialize for ComponentRef {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.key)
    }
}
