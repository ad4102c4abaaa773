//! Scalars, text, time and identifiers.

use std::cmp::Ordering;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::descriptor::{TypeDescriptor, ValueKind};
use crate::inspect::{hash_of, Inspect};

macro_rules! terminal {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(terminal!(@one $ty, $kind, |v: &$ty| v.to_string());)+
    };
    ($kind:ident, $render:expr => $($ty:ty),+ $(,)?) => {
        $(terminal!(@one $ty, $kind, $render);)+
    };
    (@one $ty:ty, $kind:ident, $render:expr) => {
        impl Inspect for $ty {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::terminal::<Self>(ValueKind::$kind)
            }

            fn native_eq(&self, other: &Self) -> Option<bool> {
                Some(self == other)
            }

            fn native_hash(&self) -> Option<u64> {
                Some(hash_of(self))
            }

            fn render(&self) -> String {
                let render: fn(&$ty) -> String = $render;
                render(self)
            }
        }
    };
}

terminal!(Primitive =>
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize,
);
terminal!(Text, |s: &String| format!("{s:?}") => String);
terminal!(Text, |s: &&'static str| format!("{s:?}") => &'static str);
terminal!(Aggregate, |_: &()| "()".to_string() => ());
terminal!(Enumeration, |o: &Ordering| format!("{o:?}") => Ordering);
terminal!(Temporal, |d: &Duration| format!("{d:?}") => Duration);
terminal!(Temporal, |t: &SystemTime| DateTime::<Utc>::from(*t).to_rfc3339() => SystemTime);
terminal!(Temporal, |t: &DateTime<Utc>| t.to_rfc3339() => DateTime<Utc>);
terminal!(Temporal, |t: &DateTime<FixedOffset>| t.to_rfc3339() => DateTime<FixedOffset>);
terminal!(Temporal, |t: &DateTime<Local>| t.to_rfc3339() => DateTime<Local>);
terminal!(Temporal => NaiveDate, NaiveTime, TimeDelta);
terminal!(Temporal, |t: &NaiveDateTime| t.format("%Y-%m-%dT%H:%M:%S%.f").to_string() => NaiveDateTime);
terminal!(Identifier => Uuid);

macro_rules! float {
    ($($ty:ty),+) => {
        $(impl Inspect for $ty {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::terminal::<Self>(ValueKind::Primitive)
            }

            fn native_eq(&self, other: &Self) -> Option<bool> {
                Some(self == other)
            }

            // 0.0 and -0.0 compare equal, so they must hash alike.
            fn native_hash(&self) -> Option<u64> {
                let normalized = if *self == 0.0 { 0.0 } else { *self };
                Some(hash_of(&normalized.to_bits()))
            }

            fn render(&self) -> String {
                self.to_string()
            }
        })+
    };
}

float!(f32, f64);
