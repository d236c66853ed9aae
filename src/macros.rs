/// Implements the zero-means-null integer conventions for a tuple newtype around a signed
/// integer (`i8`, `i16`, `i32` or `i64`).
///
/// The type must be `Copy`. The macro generates:
///
///  * [`Signed`](crate::int::Signed), so the [`int`](crate::int) functions accept it,
///  * an associated `NULL` constant and an `is_null` method,
///  * `serde::Serialize` and `serde::Deserialize` (zero is `null`),
///  * SQLx `Type`, `Encode` and `Decode` for every database supporting the inner integer
///    (zero is `NULL`).
///
/// ```rust
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// pub struct FlowId(i32);
///
/// zeronull::impl_null_int!(FlowId(i32));
///
/// assert_eq!(serde_json::to_string(&FlowId(0)).unwrap(), "null");
/// assert_eq!(serde_json::from_str::<FlowId>("null").unwrap(), FlowId::NULL);
/// ```
#[macro_export]
macro_rules! impl_null_int {
    ($name:ident($inner:ty)) => {
        impl $crate::int::Signed for $name {
            fn from_i64(value: i64) -> $crate::Result<Self> {
                <$inner as $crate::int::Signed>::from_i64(value).map($name)
            }

            fn into_i64(self) -> i64 {
                <$inner as $crate::int::Signed>::into_i64(self.0)
            }
        }

        impl $name {
            /// The value written as `NULL`.
            pub const NULL: Self = $name(0);

            pub fn is_null(self) -> bool {
                <Self as $crate::int::Signed>::is_zero(self)
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::int::serialize(self, serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                $crate::int::deserialize(deserializer)
            }
        }

        $crate::__impl_sqlx_forward!($name, $inner, encode_int, decode_int);
    };
}

/// Implements the zero-means-null string conventions for a tuple newtype around `String`.
///
/// The macro generates:
///
///  * [`StringLike`](crate::string::StringLike), so the [`string`](crate::string) functions
///    accept it,
///  * an associated `NULL` constant and an `is_null` method,
///  * `serde::Serialize` and `serde::Deserialize` (`""` is `null`),
///  * SQLx `Type`, `Encode` and `Decode` for every database supporting `String`
///    (`""` is `NULL`).
///
/// ```rust
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// pub struct Urn(String);
///
/// zeronull::impl_null_string!(Urn);
///
/// assert_eq!(serde_json::to_string(&Urn(String::new())).unwrap(), "null");
/// assert_eq!(serde_json::from_str::<Urn>("\"tel:+1\"").unwrap(), Urn("tel:+1".into()));
/// ```
#[macro_export]
macro_rules! impl_null_string {
    ($name:ident) => {
        impl $crate::string::StringLike for $name {
            fn from_string(value: ::std::string::String) -> Self {
                $name(value)
            }

            fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl $name {
            /// The value written as `NULL`.
            pub const NULL: Self = $name(::std::string::String::new());

            pub fn is_null(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::string::serialize(self, serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                $crate::string::deserialize(deserializer)
            }
        }

        $crate::__impl_sqlx_forward!(
            $name,
            ::std::string::String,
            encode_string,
            decode_string
        );
    };
}

// SQLx `Type`, `Encode` and `Decode` for a wrapper whose database representation is `$inner`,
// routed through the helpers in `crate::driver`.
#[doc(hidden)]
#[macro_export]
macro_rules! __impl_sqlx_forward {
    ($name:ident, $inner:ty, $encode:ident, $decode:ident) => {
        impl<DB> $crate::__private::sqlx_core::types::Type<DB> for $name
        where
            DB: $crate::__private::sqlx_core::database::Database,
            $inner: $crate::__private::sqlx_core::types::Type<DB>,
        {
            fn type_info() -> <DB as $crate::__private::sqlx_core::database::Database>::TypeInfo {
                <$inner as $crate::__private::sqlx_core::types::Type<DB>>::type_info()
            }

            fn compatible(
                ty: &<DB as $crate::__private::sqlx_core::database::Database>::TypeInfo,
            ) -> bool {
                <$inner as $crate::__private::sqlx_core::types::Type<DB>>::compatible(ty)
            }
        }

        impl<'q, DB> $crate::__private::sqlx_core::encode::Encode<'q, DB> for $name
        where
            DB: $crate::__private::sqlx_core::database::Database,
            $inner: $crate::__private::sqlx_core::encode::Encode<'q, DB>
                + $crate::__private::sqlx_core::types::Type<DB>,
        {
            fn encode_by_ref(
                &self,
                buf: &mut <DB as $crate::__private::sqlx_core::database::Database>::ArgumentBuffer<'q>,
            ) -> ::std::result::Result<
                $crate::__private::sqlx_core::encode::IsNull,
                $crate::__private::sqlx_core::error::BoxDynError,
            > {
                $crate::driver::$encode::<DB, $inner, Self>(self, buf)
            }
        }

        impl<'r, DB> $crate::__private::sqlx_core::decode::Decode<'r, DB> for $name
        where
            DB: $crate::__private::sqlx_core::database::Database,
            $inner: $crate::__private::sqlx_core::decode::Decode<'r, DB>,
        {
            fn decode(
                value: <DB as $crate::__private::sqlx_core::database::Database>::ValueRef<'r>,
            ) -> ::std::result::Result<Self, $crate::__private::sqlx_core::error::BoxDynError> {
                $crate::driver::$decode::<DB, $inner, Self>(value)
            }
        }
    };
}
