//! Foreign-peer binding for the radkit runtime.
//!
//! When a native instance is exposed to an external host (for example a
//! scripting-language wrapper object), repeated exposures of the *same*
//! instance must yield the *same* external peer. The binding slot in the
//! object header records that association: at most one peer per instance,
//! no ownership in either direction.
//!
//! # Contract
//!
//! - The native instance's lifetime is governed solely by its refcount;
//!   binding a peer does not retain, unbinding does not release.
//! - The peer's lifetime is governed by its own host environment. A
//!   wrapper's teardown must [`ObjectRef::unbind`] before dropping its last
//!   handle, otherwise a later [`ObjectRef::binding`] call can hand out a
//!   peer whose host-side object is gone.
//! - [`ObjectRef::unbind`] only clears the slot when the given peer is the
//!   one bound, so it is safe to call from a teardown path even after the
//!   binding was superseded.
//!
//! # Thread Safety
//!
//! The slot is a single atomic word updated with compare-and-swap, so
//! concurrent bind attempts race safely: exactly one wins, the others get
//! a conflict error.

use crate::error::{Error, Result};
use crate::runtime::object::ObjectRef;
use std::num::NonZeroUsize;
use std::sync::atomic::Ordering;

/// Opaque identity token for an external peer.
///
/// A `Peer` is just an address-sized token: the runtime never dereferences
/// it and holds no ownership over whatever it identifies. It is `Copy` and
/// carries no lifecycle API, so it cannot be mistaken for an owning
/// reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Peer(NonZeroUsize);

impl Peer {
    /// Creates a peer token from a non-zero address value.
    #[must_use]
    pub const fn from_addr(addr: NonZeroUsize) -> Self {
        Peer(addr)
    }

    /// Creates a peer token from a host object pointer.
    ///
    /// Returns `None` for a null pointer.
    #[must_use]
    pub fn from_ptr<T>(ptr: *const T) -> Option<Self> {
        NonZeroUsize::new(ptr as usize).map(Peer)
    }

    /// Returns the token's address value.
    #[must_use]
    pub const fn addr(self) -> NonZeroUsize {
        self.0
    }
}

impl ObjectRef {
    /// Associates this instance with an external peer.
    ///
    /// Binding is exclusive: an instance holds at most one peer at a time.
    /// Binding the peer that is already bound is accepted and has no
    /// effect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BindingConflict`] if a different peer is bound.
    pub fn bind(&self, peer: Peer) -> Result<()> {
        // SAFETY: self.ptr points to a valid RawObject while a handle exists
        let raw = unsafe { &*self.ptr.as_ptr() };

        match raw.binding.compare_exchange(
            0,
            peer.addr().get(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => Ok(()),
            Err(current) if current == peer.addr().get() => Ok(()),
            Err(_) => {
                radkit_log::error!(
                    "instance of {} is already bound to a different peer",
                    self.type_name()
                );
                Err(Error::BindingConflict {
                    type_name: self.type_name(),
                })
            }
        }
    }

    /// Clears the binding slot if `peer` is the peer currently bound.
    ///
    /// A no-op when a different peer (or nothing) is bound, so a host
    /// wrapper can call this unconditionally from its teardown path.
    pub fn unbind(&self, peer: Peer) {
        // SAFETY: self.ptr points to a valid RawObject while a handle exists
        let raw = unsafe { &*self.ptr.as_ptr() };

        let _ = raw.binding.compare_exchange(
            peer.addr().get(),
            0,
            Ordering::AcqRel,
            Ordering::Relaxed,
        );
    }

    /// Returns the currently bound peer, if any.
    ///
    /// Does not affect ownership of either side.
    #[must_use]
    pub fn binding(&self) -> Option<Peer> {
        // SAFETY: self.ptr points to a valid RawObject while a handle exists
        let raw = unsafe { &*self.ptr.as_ptr() };

        NonZeroUsize::new(raw.binding.load(Ordering::Acquire)).map(Peer)
    }

    /// Returns true if a peer is bound to this instance.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.binding().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::typedesc::TypeDescriptor;
    use crate::runtime::CoreObject;
    use std::any::Any;

    struct Native;

    static NATIVE_TYPE: TypeDescriptor =
        TypeDescriptor::new("Native", || Ok(Box::new(Native)));

    impl CoreObject for Native {
        fn type_descriptor(&self) -> &'static TypeDescriptor {
            &NATIVE_TYPE
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn peer(addr: usize) -> Peer {
        Peer::from_addr(NonZeroUsize::new(addr).unwrap())
    }

    #[test]
    fn test_bind_and_get() {
        let obj = ObjectRef::create(&NATIVE_TYPE).unwrap();
        assert!(!obj.is_bound());

        let p = peer(0x1000);
        obj.bind(p).unwrap();

        assert!(obj.is_bound());
        assert_eq!(obj.binding(), Some(p));
    }

    #[test]
    fn test_bind_is_exclusive() {
        let obj = ObjectRef::create(&NATIVE_TYPE).unwrap();

        let p1 = peer(0x1000);
        let p2 = peer(0x2000);

        obj.bind(p1).unwrap();
        assert_eq!(
            obj.bind(p2).unwrap_err(),
            Error::BindingConflict {
                type_name: "Native"
            }
        );

        // The first peer is still bound
        assert_eq!(obj.binding(), Some(p1));
    }

    #[test]
    fn test_rebinding_same_peer_is_accepted() {
        let obj = ObjectRef::create(&NATIVE_TYPE).unwrap();
        let p = peer(0x1000);

        obj.bind(p).unwrap();
        obj.bind(p).unwrap();

        assert_eq!(obj.binding(), Some(p));
    }

    #[test]
    fn test_unbind_clears_slot() {
        let obj = ObjectRef::create(&NATIVE_TYPE).unwrap();
        let p = peer(0x1000);

        obj.bind(p).unwrap();
        obj.unbind(p);

        assert!(!obj.is_bound());
        assert_eq!(obj.binding(), None);
    }

    #[test]
    fn test_unbind_wrong_peer_is_noop() {
        let obj = ObjectRef::create(&NATIVE_TYPE).unwrap();
        let p1 = peer(0x1000);
        let p2 = peer(0x2000);

        obj.bind(p1).unwrap();
        obj.unbind(p2);

        assert_eq!(obj.binding(), Some(p1));
    }

    #[test]
    fn test_unbind_then_rebind() {
        let obj = ObjectRef::create(&NATIVE_TYPE).unwrap();
        let p1 = peer(0x1000);
        let p2 = peer(0x2000);

        obj.bind(p1).unwrap();
        obj.unbind(p1);
        obj.bind(p2).unwrap();

        assert_eq!(obj.binding(), Some(p2));
    }

    #[test]
    fn test_binding_survives_retain_release() {
        let obj = ObjectRef::create(&NATIVE_TYPE).unwrap();
        let p = peer(0x1000);
        obj.bind(p).unwrap();

        let alias = obj.clone();
        assert_eq!(alias.binding(), Some(p));
        drop(alias);

        assert_eq!(obj.binding(), Some(p));
    }

    #[test]
    fn test_peer_from_ptr() {
        let host = Box::new(42u64);
        let p = Peer::from_ptr(&*host).unwrap();
        assert_eq!(p.addr().get(), &*host as *const u64 as usize);

        assert!(Peer::from_ptr(std::ptr::null::<u64>()).is_none());
    }
}
