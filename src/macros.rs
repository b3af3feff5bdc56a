/// Declares the endpoint table.
///
/// Every row generates one `Operation` variant together with its wire name and
/// its `EndpointDescriptor`, so adding an operation is a one-line change.
///
/// ## Example
///
/// ```ignore
/// endpoint_table! {
///     GetCoupons => "getCoupons", Get, "/coupons";
///     UpdateCoupon => "updateCoupon", Put, "/coupons/:id", body = "coupon";
/// }
/// ```
macro_rules! endpoint_table {
    (@body_key) => {
        None
    };
    (@body_key $body_key:literal) => {
        Some($body_key)
    };
    ($($variant:ident => $name:literal, $method:ident, $template:literal $(, body = $body_key:literal)?;)*) => {
        /// An operation of the Selly API.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operation {
            $(
                #[doc = concat!("`", $name, "`: ", stringify!($method), " `", $template, "`")]
                $variant,
            )*
        }

        impl Operation {
            /// All operations, in table order.
            pub const ALL: &'static [Operation] = &[$(Operation::$variant),*];

            /// The wire name of the operation, e.g. `getCoupon`.
            pub fn name(self) -> &'static str {
                match self {
                    $(Operation::$variant => $name,)*
                }
            }

            /// The endpoint descriptor of the operation.
            pub fn descriptor(self) -> &'static EndpointDescriptor {
                match self {
                    $(
                        Operation::$variant => {
                            const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
                                method: HttpMethod::$method,
                                url_template: $template,
                                body_key: endpoint_table!(@body_key $($body_key)?),
                            };
                            &DESCRIPTOR
                        }
                    )*
                }
            }
        }

        impl std::str::FromStr for Operation {
            type Err = UnknownOperation;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Operation::$variant),)*
                    other => Err(UnknownOperation(other.to_string())),
                }
            }
        }
    };
}
