//! Observable value cell.
//!
//! A single-slot broadcast built on [`tokio::sync::watch`]. The cell always holds
//! a current value, hands it to late subscribers immediately, and delivers
//! changes latest-wins: a slow reader may skip intermediate values but always
//! ends up on the most recent one.
//!
//! 单槽广播值：始终持有当前值，新订阅者立即可见，慢读者只保证看到最新值。

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

/// Owning side of an observable value. Only the owner can publish.
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T> Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Publish a new value, waking every subscriber even when nobody listens yet.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Publish `value` only if it differs from the current one.
    ///
    /// Returns whether subscribers were notified.
    pub fn set_if_changed(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.tx.borrow())
            .finish()
    }
}

/// Reading side of an [`Observable`].
///
/// A fresh subscription treats the value present at subscribe time as already
/// seen; [`Subscription::changed`] resolves on the next publish.
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
}

impl<T> Clone for Subscription<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T> Subscription<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Current value without marking it as seen.
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Current value, marking it as seen.
    pub fn latest(&mut self) -> T {
        self.rx.borrow_and_update().clone()
    }

    /// Wait for the next publish and return the most recent value.
    ///
    /// Returns `None` once the owning [`Observable`] has been dropped.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.latest())
    }

    /// Resolve with the first value (current one included) matching `pred`.
    pub async fn wait_for(&mut self, mut pred: impl FnMut(&T) -> bool) -> Option<T> {
        loop {
            {
                let value = self.rx.borrow_and_update();
                if pred(&*value) {
                    return Some(value.clone());
                }
            }
            self.rx.changed().await.ok()?;
        }
    }

    /// Project every observed value through `f`.
    pub fn map<U, F>(self, f: F) -> Projection<T, U>
    where
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        Projection {
            inner: self,
            f: Arc::new(f),
        }
    }
}

/// A [`Subscription`] seen through a mapping function.
pub struct Projection<S, U> {
    inner: Subscription<S>,
    f: Arc<dyn Fn(&S) -> U + Send + Sync>,
}

impl<S, U> Projection<S, U>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn current(&self) -> U {
        (self.f)(&*self.inner.rx.borrow())
    }

    pub async fn changed(&mut self) -> Option<U> {
        self.inner.rx.changed().await.ok()?;
        Some((self.f)(&*self.inner.rx.borrow_and_update()))
    }

    pub async fn wait_for(&mut self, mut pred: impl FnMut(&U) -> bool) -> Option<U> {
        loop {
            let projected = (self.f)(&*self.inner.rx.borrow_and_update());
            if pred(&projected) {
                return Some(projected);
            }
            self.inner.rx.changed().await.ok()?;
        }
    }
}

impl<S, U> Clone for Projection<S, U> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            f: Arc::clone(&self.f),
        }
    }
}
