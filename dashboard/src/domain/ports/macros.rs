//! Defines helper macros for generating domain port error enums.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (
        @ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*)
        $field:ident : $ty:ty, $($rest:tt)*
    ) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident {
                    $($(#[$field_meta:meta])* $field:ident : $ty:ty),* $(,)?
                } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($(#[$field_meta])* $field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor coverage through the store failure enum.

    use rstest::rstest;

    use crate::domain::StoreFailure;

    #[rstest]
    fn string_fields_accept_str() {
        let err = StoreFailure::transport("connection reset");

        assert_eq!(
            err,
            StoreFailure::Transport {
                message: "connection reset".to_owned(),
            }
        );
        assert_eq!(err.to_string(), "transport failed: connection reset");
    }

    #[rstest]
    fn mixed_fields_keep_their_types() {
        let err = StoreFailure::unexpected_status(404_u16, "x");

        assert_eq!(
            err,
            StoreFailure::UnexpectedStatus {
                status: 404,
                body: "x".to_owned(),
            }
        );
        assert_eq!(err.to_string(), "unexpected status 404: x");
    }

    #[rstest]
    #[case(StoreFailure::timeout(String::from("slow")), "request timed out: slow")]
    #[case(StoreFailure::decode("not an array"), "response decode failed: not an array")]
    fn owned_and_borrowed_strings_render_alike(
        #[case] err: StoreFailure,
        #[case] expected: &str,
    ) {
        assert_eq!(err.to_string(), expected);
    }
}
