//! Accessor generators for resource handles.
//!
//! Each handle wraps an engine in a field named `inner`; these macros expand to
//! getters (and setters) reading that engine's property bag.

/// `name()` -> `Option<&str>` and `set_name(value)` for text properties.
macro_rules! text_properties {
    ($($name:ident),* $(,)?) => {
        paste::paste! {
            $(
                pub fn $name(&self) -> Option<&str> {
                    self.inner.properties().get_str(stringify!($name))
                }

                pub fn [<set_ $name>](&mut self, value: impl Into<String>) {
                    self.inner.set_property(stringify!($name), value.into());
                }
            )*
        }
    };
}

/// `name()` -> `Option<DateTime<FixedOffset>>` for server-maintained timestamps.
macro_rules! date_properties {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
                self.inner.date(stringify!($name))
            }
        )*
    };
}

pub(crate) use date_properties;
pub(crate) use text_properties;
