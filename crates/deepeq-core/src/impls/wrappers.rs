//! Indirections the engine looks through, plus weak references and function
//! pointers.

use std::cell::RefCell;
use std::rc::{self, Rc};
use std::sync::{self, Arc, Mutex, RwLock, TryLockError};

use deepeq_types::ReadError;
use tracing::warn;

use crate::descriptor::TypeDescriptor;
use crate::inspect::Inspect;
use crate::value::{Node, Value};

impl<T: Inspect> Inspect for Option<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::wrapper::<Self, T>(|o| Ok(Value::from(o.as_ref())))
    }
}

macro_rules! pointer {
    ($($ty:ident),+) => {
        $(impl<T: Inspect> Inspect for $ty<T> {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::wrapper::<Self, T>(|p| Ok(Value::Borrowed(&**p)))
            }
        })+
    };
}

pointer!(Box, Rc, Arc);

impl<T: Inspect> Inspect for RefCell<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::wrapper::<Self, T>(|cell| {
            let guard = cell.try_borrow().map_err(|_| ReadError::Borrowed)?;
            Ok(Value::held(guard))
        })
    }
}

// `try_lock` rather than `lock`: the same mutex can be reached twice in a
// cyclic graph and blocking would deadlock the comparison.
impl<T: Inspect> Inspect for Mutex<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::wrapper::<Self, T>(|m| match m.try_lock() {
            Ok(guard) => Ok(Value::held(guard)),
            Err(err) => Err(lock_error(err)),
        })
    }
}

impl<T: Inspect> Inspect for RwLock<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::wrapper::<Self, T>(|l| match l.try_read() {
            Ok(guard) => Ok(Value::held(guard)),
            Err(err) => Err(lock_error(err)),
        })
    }
}

fn lock_error<G>(err: TryLockError<G>) -> ReadError {
    match err {
        TryLockError::Poisoned(_) => {
            warn!("lock poisoned; member skipped");
            ReadError::Poisoned
        }
        TryLockError::WouldBlock => ReadError::Locked,
    }
}

impl<T: 'static> Inspect for rc::Weak<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::weak::<Self>()
    }
}

impl<T: 'static> Inspect for sync::Weak<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::weak::<Self>()
    }
}

macro_rules! callable {
    ($($($arg:ident),* => $ret:ident);+) => {
        $(impl<$($arg: 'static,)* $ret: 'static> Inspect for fn($($arg),*) -> $ret {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::callable::<Self>()
            }
        })+
    };
}

callable!(=> R; A => R; A, B => R);

/// A value whose concrete type is chosen at runtime.
///
/// Compares as the value it holds: two `DynValue`s holding different
/// concrete types are reported as differing types.
pub struct DynValue(Box<dyn Node>);

impl DynValue {
    pub fn new<T: Inspect>(value: T) -> Self {
        Self(Box::new(value))
    }

    pub fn get(&self) -> &dyn Node {
        &*self.0
    }
}

impl std::fmt::Debug for DynValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DynValue({})", self.0.type_info())
    }
}

impl Inspect for DynValue {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::dynamic::<Self>(|d| Ok(Value::Borrowed(d.get())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{compare, compare_report};
    use crate::value::with_resolved;
    use deepeq_types::{CompareOptions, MemberPolicy};

    fn equal<T: Inspect>(a: &T, b: &T) -> bool {
        compare(a, b, MemberPolicy::default(), &CompareOptions::default())
    }

    #[test]
    fn pointers_are_transparent() {
        assert!(equal(&Box::new(3), &Box::new(3)));
        assert!(equal(&Arc::new("x".to_string()), &Arc::new("x".to_string())));
        assert!(!equal(&Rc::new(1), &Rc::new(2)));
    }

    #[test]
    fn locks_are_read_without_blocking() {
        let a = Mutex::new(vec![1, 2]);
        let b = Mutex::new(vec![2, 1]);
        assert!(equal(&a, &b));
        let held = a.lock().unwrap();
        let err = with_resolved(&Value::from(&a), |_| ()).unwrap_err();
        assert_eq!(err, ReadError::Locked);
        drop(held);

        let c = RwLock::new(5_u8);
        let d = RwLock::new(5_u8);
        assert!(equal(&c, &d));
    }

    #[test]
    fn poisoned_mutex_is_a_read_error() {
        let m = Arc::new(Mutex::new(1_u8));
        let poisoner = Arc::clone(&m);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison");
        })
        .join();
        let err = with_resolved(&Value::from(&*m), |_| ()).unwrap_err();
        assert_eq!(err, ReadError::Poisoned);
    }

    #[test]
    fn dyn_values_compare_their_payload() {
        assert!(equal(&DynValue::new(4_i32), &DynValue::new(4_i32)));
        let r = compare_report(
            &DynValue::new(4_i32),
            &DynValue::new("4".to_string()),
            MemberPolicy::default(),
            &CompareOptions::default(),
        );
        assert!(!r.is_equal());
        assert!(r.mentions("root: types differ"));
    }

    #[test]
    fn function_pointers_are_callable() {
        assert!(<fn(u8) -> bool>::describe().is_callable());
        assert!(<fn()>::describe().is_callable());
        assert!(rc::Weak::<u8>::describe().is_weak());
    }
}
