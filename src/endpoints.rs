//! The endpoint table of the Selly API.
//!
//! Each [`Operation`] maps to exactly one [`EndpointDescriptor`], which is all
//! the dispatcher needs to know to turn a call into an HTTP request.

use std::ops::Range;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in an identifier so it stays a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// HTTP methods used by the Selly API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Returns whether requests with this method carry a body key.
    pub fn is_mutating(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }

    /// Converts the method into a `reqwest::Method`.
    pub fn as_method(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        })
    }
}

/// Describes the wire shape of a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The path, relative to the API root, optionally containing one `:name` placeholder.
    pub url_template: &'static str,
    /// The key the payload is wrapped in, e.g. `coupon`.
    pub body_key: Option<&'static str>,
}

impl EndpointDescriptor {
    /// Returns whether the URL template contains a placeholder segment.
    pub fn requires_id(&self) -> bool {
        self.placeholder().is_some()
    }

    /// The body key, if the method is one that carries a body.
    pub fn effective_body_key(&self) -> Option<&'static str> {
        self.body_key.filter(|_| self.method.is_mutating())
    }

    /// Substitutes `id` for the placeholder segment.
    ///
    /// The identifier is percent-encoded so that `/`, `?` and `#` cannot leave
    /// the segment. Only the first placeholder is replaced. A template without a
    /// placeholder is returned unchanged.
    pub fn path_for(&self, id: &str) -> String {
        match self.placeholder() {
            Some(range) => {
                let mut path = String::with_capacity(self.url_template.len() + id.len());
                path.push_str(&self.url_template[..range.start]);
                path.extend(utf8_percent_encode(id, SEGMENT));
                path.push_str(&self.url_template[range.end..]);
                path
            }
            None => self.url_template.to_string(),
        }
    }

    /// Byte range of the first `:name` segment, marker included.
    fn placeholder(&self) -> Option<Range<usize>> {
        let bytes = self.url_template.as_bytes();
        let start = bytes
            .iter()
            .enumerate()
            .position(|(i, b)| *b == b':' && bytes.get(i + 1).is_some_and(|next| *next != b'/'))?;
        let end = self.url_template[start..]
            .find('/')
            .map_or(self.url_template.len(), |offset| start + offset);
        Some(start..end)
    }
}

/// A string that does not name any operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation `{0}`")]
pub struct UnknownOperation(
    /// The name that was not recognized.
    pub String,
);

endpoint_table! {
    GetCoupons => "getCoupons", Get, "/coupons";
    GetCoupon => "getCoupon", Get, "/coupon/:id";
    CreateCoupon => "createCoupon", Post, "/coupons", body = "coupon";
    UpdateCoupon => "updateCoupon", Put, "/coupons/:id", body = "coupon";
    GetOrders => "getOrders", Get, "/orders";
    GetOrder => "getOrder", Get, "/orders/:id";
    GetProducts => "getProducts", Get, "/products";
    GetProduct => "getProduct", Get, "/products/:id";
    CreateProduct => "createProduct", Post, "/products", body = "product";
    UpdateProduct => "updateProduct", Put, "/products/:id", body = "product";
    DeleteProduct => "deleteProduct", Delete, "/products/:id";
    GetProductGroups => "getProductGroups", Get, "/product_groups";
    GetProductGroup => "getProductGroup", Get, "/product_groups/:id";
    GetQueries => "getQueries", Get, "/queries";
    GetQuery => "getQuery", Get, "/queries/:id";
    CreatePayment => "createPayment", Post, "/pay";
    DeletePayment => "deletePayment", Delete, "/pay/:id";
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_every_operation_once() {
        assert_eq!(Operation::ALL.len(), 17);
        for operation in Operation::ALL {
            assert_eq!(operation.name().parse::<Operation>(), Ok(*operation));
        }
        assert_eq!(
            "getCouponz".parse::<Operation>(),
            Err(UnknownOperation("getCouponz".to_string()))
        );
    }

    #[test]
    fn templates_have_at_most_one_placeholder() {
        for operation in Operation::ALL {
            let template = operation.descriptor().url_template;
            assert!(template.starts_with('/'), "{template}");
            assert!(template.matches(':').count() <= 1, "{template}");
        }
    }

    #[test]
    fn body_keys_only_on_mutating_methods() {
        for operation in Operation::ALL {
            let descriptor = operation.descriptor();
            if descriptor.body_key.is_some() {
                assert!(descriptor.method.is_mutating(), "{operation}");
            }
        }
        assert_eq!(Operation::CreatePayment.descriptor().body_key, None);
        assert_eq!(Operation::DeletePayment.descriptor().body_key, None);
    }

    #[test]
    fn descriptors_match_the_api() {
        let update = Operation::UpdateCoupon.descriptor();
        assert_eq!(update.method, HttpMethod::Put);
        assert_eq!(update.url_template, "/coupons/:id");
        assert_eq!(update.effective_body_key(), Some("coupon"));

        let delete = Operation::DeleteProduct.descriptor();
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.effective_body_key(), None);
    }

    #[test]
    fn requires_id_follows_the_template() {
        assert!(Operation::GetCoupon.descriptor().requires_id());
        assert!(Operation::DeletePayment.descriptor().requires_id());
        assert!(!Operation::GetCoupons.descriptor().requires_id());
        assert!(!Operation::CreatePayment.descriptor().requires_id());
    }

    #[test]
    fn substitution_replaces_only_the_placeholder() {
        let descriptor = Operation::UpdateCoupon.descriptor();
        assert_eq!(descriptor.path_for("xyz"), "/coupons/xyz");

        let nested = EndpointDescriptor {
            method: HttpMethod::Get,
            url_template: "/queries/:id/messages",
            body_key: None,
        };
        assert_eq!(nested.path_for("q1"), "/queries/q1/messages");

        let first_only = EndpointDescriptor {
            method: HttpMethod::Get,
            url_template: "/a/:first/b/:second",
            body_key: None,
        };
        assert_eq!(first_only.path_for("1"), "/a/1/b/:second");

        assert_eq!(Operation::GetCoupons.descriptor().path_for("xyz"), "/coupons");
    }

    #[test]
    fn identifiers_stay_inside_their_segment() {
        let descriptor = Operation::DeleteProduct.descriptor();
        assert_eq!(descriptor.path_for("../pay/x"), "/products/..%2Fpay%2Fx");
        assert_eq!(descriptor.path_for("a/b"), "/products/a%2Fb");
        assert_eq!(descriptor.path_for("a?b=1"), "/products/a%3Fb=1");
        assert_eq!(descriptor.path_for("a#frag"), "/products/a%23frag");
        assert_eq!(descriptor.path_for("a\\b"), "/products/a%5Cb");
        assert_eq!(descriptor.path_for("100%"), "/products/100%25");
        assert_eq!(descriptor.path_for("prod-1_x.y"), "/products/prod-1_x.y");
    }

    #[test]
    fn body_key_is_ignored_for_reads() {
        let descriptor = EndpointDescriptor {
            method: HttpMethod::Get,
            url_template: "/coupons",
            body_key: Some("coupon"),
        };
        assert_eq!(descriptor.effective_body_key(), None);
    }
}
