//! Declarative helpers for describing models and enumerations

/// Implement [`Model`](crate::Model) and [`Mappable`](crate::Mappable) for a
/// struct by listing its member names and fields.
///
/// The struct must be `Clone + Send + Sync + 'static`. By default it must also
/// implement `Default`, which becomes its default constructor; use the
/// `no_default` form for models the engine is not allowed to create.
///
/// ```
/// use objmap_core::mappable_model;
///
/// #[derive(Debug, Clone, Default)]
/// struct Address {
///     street: String,
///     city: String,
/// }
///
/// mappable_model!(Address {
///     "Street" => street,
///     "City" => city,
/// });
/// ```
#[macro_export]
macro_rules! mappable_model {
    ($ty:ident { $($member:literal => $field:ident),* $(,)? }) => {
        $crate::mappable_model!(@impl $ty, default, { $($member => $field),* });
    };
    ($ty:ident, no_default { $($member:literal => $field:ident),* $(,)? }) => {
        $crate::mappable_model!(@impl $ty, no_default, { $($member => $field),* });
    };
    (@constructor default, $builder:expr) => {
        $builder.default_constructor()
    };
    (@constructor no_default, $builder:expr) => {
        $builder
    };
    (@absent default, $ty:ident) => {
        ::std::option::Option::Some(<$ty as ::std::default::Default>::default())
    };
    (@absent no_default, $ty:ident) => {
        ::std::option::Option::None
    };
    (@impl $ty:ident, $ctor:ident, { $($member:literal => $field:ident),* }) => {
        impl $crate::Model for $ty {
            const NAME: &'static str = stringify!($ty);

            fn descriptor() -> &'static $crate::ModelDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<$crate::ModelDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    let builder = $crate::mappable_model!(
                        @constructor $ctor,
                        $crate::ModelDescriptor::builder::<$ty>(stringify!($ty))
                    );
                    builder
                        $(.field($member, |model| &model.$field, |model| &mut model.$field))*
                        .build()
                })
            }
        }

        impl $crate::Mappable for $ty {
            fn shape() -> $crate::Shape {
                $crate::Shape::model::<$ty>()
            }

            fn into_value(self) -> $crate::Value {
                $crate::Value::Object($crate::Instance::new(self))
            }

            fn from_value(value: $crate::Value) -> ::std::option::Option<Self> {
                value.into_model::<$ty>()
            }

            fn absent() -> ::std::option::Option<Self> {
                $crate::mappable_model!(@absent $ctor, $ty)
            }
        }
    };
}

/// Implement [`Mappable`](crate::Mappable) for a fieldless enum.
///
/// Variants convert to and from text by case-insensitive name and to and from
/// integers by discriminant.
///
/// ```
/// use objmap_core::mappable_enum;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Currency {
///     Usd,
///     Eur,
/// }
///
/// mappable_enum!(Currency { Usd, Eur });
/// ```
#[macro_export]
macro_rules! mappable_enum {
    ($ty:ident { $($variant:ident),* $(,)? }) => {
        impl $ty {
            const OBJMAP_VARIANTS: &'static [(&'static str, i64)] =
                &[$((stringify!($variant), $ty::$variant as i64)),*];
        }

        impl $crate::Mappable for $ty {
            fn shape() -> $crate::Shape {
                $crate::Shape::enumeration($crate::EnumRef::new::<$ty>(
                    stringify!($ty),
                    $ty::OBJMAP_VARIANTS,
                ))
            }

            fn into_value(self) -> $crate::Value {
                let name = match self {
                    $($ty::$variant => stringify!($variant),)*
                };
                $crate::Value::Enum($crate::EnumValue {
                    key: $crate::TypeKey::named::<$ty>(stringify!($ty)),
                    name,
                    discriminant: self as i64,
                })
            }

            fn from_value(value: $crate::Value) -> ::std::option::Option<Self> {
                match value {
                    $crate::Value::Enum(e) if e.key.is::<$ty>() => match e.name {
                        $(stringify!($variant) => ::std::option::Option::Some($ty::$variant),)*
                        _ => ::std::option::Option::None,
                    },
                    _ => ::std::option::Option::None,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Mappable, Model, Value};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Ticket {
        id: u32,
        holder: Option<String>,
    }

    crate::mappable_model!(Ticket {
        "Id" => id,
        "Holder" => holder,
    });

    #[derive(Debug, Clone, PartialEq)]
    struct Sealed {
        id: u32,
    }

    crate::mappable_model!(Sealed, no_default { "Id" => id });

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Tier {
        Basic = 1,
        Premium = 5,
    }

    crate::mappable_enum!(Tier { Basic, Premium });

    #[test]
    fn test_model_descriptor_from_macro() {
        let descriptor = Ticket::descriptor();
        assert_eq!(descriptor.name(), "Ticket");
        assert!(descriptor.has_constructor());
        assert_eq!(descriptor.members().len(), 2);
        assert!(descriptor.member("holder").unwrap().shape().is_optional());
    }

    #[test]
    fn test_no_default_model() {
        assert!(!Sealed::descriptor().has_constructor());
        assert_eq!(Sealed::absent(), None);
        assert_eq!(Ticket::absent(), Some(Ticket::default()));
    }

    #[test]
    fn test_enum_value_round_trip() {
        let value = Tier::Premium.into_value();
        match &value {
            Value::Enum(e) => {
                assert_eq!(e.name, "Premium");
                assert_eq!(e.discriminant, 5);
            }
            other => panic!("unexpected value {other:?}"),
        }
        assert_eq!(Tier::from_value(value), Some(Tier::Premium));
        assert_eq!(Tier::from_value(Value::Text("Premium".to_string())), None);
        assert!(Tier::shape().is_primitive_like());
    }
}
