//! String-backed enumerations reported by the API.
//!
//! The API adds statuses and task types over time, so decoding must never
//! fail on a value this crate does not know. Each enumeration is generated by
//! `wire_enum!`: a closed set of literals plus an `Unknown` arm. The field is
//! read as an arbitrary JSON value and then looked up with `from_wire`, so a
//! missing, `null`, empty, non-string, or unrecognized value all land on
//! `Unknown` while the rest of the record decodes normally.

/// Declares a wire enumeration.
///
/// ```ignore
/// wire_enum! {
///     /// Current state of a task.
///     pub enum Status {
///         InProgress => "IN_PROGRESS",
///         Done => "DONE",
///     }
/// }
/// ```
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $literal:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value outside the known set, including an empty or missing one.
            #[default]
            Unknown,
        }

        impl $name {
            /// Every known variant, `Unknown` excluded.
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            /// Total lookup from the wire literal.
            pub fn from_wire(raw: &str) -> Self {
                match raw {
                    $( $literal => $name::$variant, )+
                    _ => $name::Unknown,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $literal, )+
                    $name::Unknown => "UNKNOWN",
                }
            }

            pub fn is_unknown(&self) -> bool {
                matches!(self, $name::Unknown)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                $name::from_wire(raw)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(match raw {
                    ::serde_json::Value::String(raw) => $name::from_wire(&raw),
                    _ => $name::Unknown,
                })
            }
        }
    };
}

pub(crate) use wire_enum;
