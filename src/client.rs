use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use typed_builder::TypedBuilder;

use crate::dispatch::{dispatch, Args};
use crate::transport::{HttpTransport, Transport};
use crate::{Credentials, Operation, SellyError, SellyResult};

/// The versioned root of the Selly API.
pub const DEFAULT_BASE_URL: &str = "https://selly.gg/api/v2/";

/// The user agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "selly-rs";

/// Options for constructing a [`SellyClient`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct ClientOptions {
    /// Value of the `User-Agent` header
    #[builder(
        default = DEFAULT_USER_AGENT.to_string(),
        setter(transform = |user_agent: &str| user_agent.to_string())
    )]
    pub user_agent: String,
    /// API root all endpoint paths are resolved against
    #[builder(
        default = DEFAULT_BASE_URL.to_string(),
        setter(transform = |base_url: &str| base_url.to_string())
    )]
    pub base_url: String,
    /// Timeout for the request
    #[builder(default = Duration::from_secs(60))]
    pub timeout: Duration,
    /// Allow unsafe SSL certificates
    #[builder(default = false)]
    pub allow_insecure: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The client for the Selly API.
///
/// Every operation of the endpoint table is available as a named method, through
/// [`call`](Self::call), or as a [`BoundOperation`]. The client holds no mutable
/// state and can be cloned and shared freely.
pub struct SellyClient<T = HttpTransport> {
    transport: Arc<T>,
}

impl<T> Clone for SellyClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl SellyClient<HttpTransport> {
    /// Creates a client for the given account.
    ///
    /// Fails before anything else is built if `email` or `api_key` is empty.
    ///
    /// ## Example
    ///
    /// ```rust,no_run
    /// use selly_rs::{ClientOptions, SellyClient};
    ///
    /// let client = SellyClient::create(
    ///     "user@example.com",
    ///     "my-api-key",
    ///     ClientOptions::builder().user_agent("my-shop/1.0").build(),
    /// )
    /// .expect("valid credentials");
    /// ```
    pub fn create(email: &str, api_key: &str, options: ClientOptions) -> SellyResult<Self> {
        let credentials = Credentials::new(email, api_key)?;
        let transport = HttpTransport::new(&credentials, &options)?;
        tracing::debug!(
            base_url = %transport.base_url(),
            user_agent = %options.user_agent,
            "created Selly client"
        );
        Ok(Self::from_transport(transport))
    }

    /// Creates a client with default options.
    pub fn new(email: &str, api_key: &str) -> SellyResult<Self> {
        Self::create(email, api_key, ClientOptions::default())
    }
}

impl<T: Transport> SellyClient<T> {
    /// Creates a client on top of an existing transport.
    pub fn from_transport(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// The transport requests are sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs an operation and returns the JSON payload of the response.
    pub async fn call(&self, operation: Operation, args: Args) -> SellyResult<Value> {
        dispatch(self.transport.as_ref(), operation, args).await
    }

    /// Performs an operation and deserializes the response to the type `R`.
    ///
    /// ## Example
    ///
    /// ```rust,no_run
    /// use selly_rs::{models::Coupon, Args, Operation, SellyClient};
    ///
    /// # async fn run(client: SellyClient) -> selly_rs::SellyResult<()> {
    /// let coupons = client
    ///     .call_generic::<Vec<Coupon>>(Operation::GetCoupons, Args::None)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call_generic<R>(&self, operation: Operation, args: Args) -> SellyResult<R>
    where
        R: DeserializeOwned,
    {
        let value = self.call(operation, args).await?;
        serde_json::from_value(value).map_err(SellyError::InvalidResponse)
    }

    /// Binds an operation to this client.
    pub fn operation(&self, operation: Operation) -> BoundOperation<'_, T> {
        BoundOperation {
            client: self,
            operation,
        }
    }

    /// All operations of the endpoint table, keyed by their wire name.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, BoundOperation<'_, T>)> + '_ {
        Operation::ALL
            .iter()
            .map(move |operation| (operation.name(), self.operation(*operation)))
    }

    // Coupons

    /// `GET /coupons`
    pub async fn get_coupons(&self) -> SellyResult<Value> {
        self.call(Operation::GetCoupons, Args::None).await
    }

    /// `GET /coupon/:id`
    pub async fn get_coupon(&self, id: &str) -> SellyResult<Value> {
        self.call(Operation::GetCoupon, Args::id(id)).await
    }

    /// `POST /coupons`. The payload is sent as the body unchanged.
    pub async fn create_coupon<P>(&self, payload: &P) -> SellyResult<Value>
    where
        P: Serialize + ?Sized,
    {
        self.call(Operation::CreateCoupon, Args::payload(payload)?)
            .await
    }

    /// `PUT /coupons/:id`, body `{ "coupon": coupon }`.
    pub async fn update_coupon<P>(&self, id: &str, coupon: &P) -> SellyResult<Value>
    where
        P: Serialize + ?Sized,
    {
        self.call(Operation::UpdateCoupon, Args::id_and_payload(id, coupon)?)
            .await
    }

    // Orders

    /// `GET /orders`
    pub async fn get_orders(&self) -> SellyResult<Value> {
        self.call(Operation::GetOrders, Args::None).await
    }

    /// `GET /orders/:id`
    pub async fn get_order(&self, id: &str) -> SellyResult<Value> {
        self.call(Operation::GetOrder, Args::id(id)).await
    }

    // Products

    /// `GET /products`
    pub async fn get_products(&self) -> SellyResult<Value> {
        self.call(Operation::GetProducts, Args::None).await
    }

    /// `GET /products/:id`
    pub async fn get_product(&self, id: &str) -> SellyResult<Value> {
        self.call(Operation::GetProduct, Args::id(id)).await
    }

    /// `POST /products`. The payload is sent as the body unchanged.
    pub async fn create_product<P>(&self, payload: &P) -> SellyResult<Value>
    where
        P: Serialize + ?Sized,
    {
        self.call(Operation::CreateProduct, Args::payload(payload)?)
            .await
    }

    /// `PUT /products/:id`, body `{ "product": product }`.
    pub async fn update_product<P>(&self, id: &str, product: &P) -> SellyResult<Value>
    where
        P: Serialize + ?Sized,
    {
        self.call(Operation::UpdateProduct, Args::id_and_payload(id, product)?)
            .await
    }

    /// `DELETE /products/:id`
    pub async fn delete_product(&self, id: &str) -> SellyResult<Value> {
        self.call(Operation::DeleteProduct, Args::id(id)).await
    }

    // Product groups

    /// `GET /product_groups`
    pub async fn get_product_groups(&self) -> SellyResult<Value> {
        self.call(Operation::GetProductGroups, Args::None).await
    }

    /// `GET /product_groups/:id`
    pub async fn get_product_group(&self, id: &str) -> SellyResult<Value> {
        self.call(Operation::GetProductGroup, Args::id(id)).await
    }

    // Queries

    /// `GET /queries`
    pub async fn get_queries(&self) -> SellyResult<Value> {
        self.call(Operation::GetQueries, Args::None).await
    }

    /// `GET /queries/:id`
    pub async fn get_query(&self, id: &str) -> SellyResult<Value> {
        self.call(Operation::GetQuery, Args::id(id)).await
    }

    // Payments

    /// `POST /pay`. The payload is sent as the body unchanged.
    pub async fn create_payment<P>(&self, payment: &P) -> SellyResult<Value>
    where
        P: Serialize + ?Sized,
    {
        self.call(Operation::CreatePayment, Args::payload(payment)?)
            .await
    }

    /// `DELETE /pay/:id`
    pub async fn delete_payment(&self, id: &str) -> SellyResult<Value> {
        self.call(Operation::DeletePayment, Args::id(id)).await
    }
}

/// An operation bound to a client, callable with [`Args`].
pub struct BoundOperation<'a, T> {
    client: &'a SellyClient<T>,
    operation: Operation,
}

impl<T: Transport> BoundOperation<'_, T> {
    /// The bound operation.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Performs the operation.
    pub async fn call(&self, args: Args) -> SellyResult<Value> {
        self.client.call(self.operation, args).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::dispatch::tests::RecordingTransport;
    use crate::models::Coupon;
    use crate::transport::TransportFailure;
    use crate::HttpMethod;

    fn client() -> SellyClient<RecordingTransport> {
        SellyClient::from_transport(RecordingTransport::default())
    }

    #[test]
    fn create_rejects_missing_credentials() {
        assert!(matches!(
            SellyClient::create("", "key", ClientOptions::default()),
            Err(SellyError::MissingCredential("email"))
        ));
        assert!(matches!(
            SellyClient::create("user@example.com", "", ClientOptions::default()),
            Err(SellyError::MissingCredential("api_key"))
        ));
    }

    #[test]
    fn create_rejects_invalid_user_agent() {
        let options = ClientOptions::builder().user_agent("bad\nagent").build();
        assert!(matches!(
            SellyClient::create("user@example.com", "key", options),
            Err(SellyError::InvalidHeaderValue(_))
        ));
    }

    #[test]
    fn default_options() {
        let options = ClientOptions::default();
        assert_eq!(options.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(options.base_url, DEFAULT_BASE_URL);
        assert_eq!(options.timeout, Duration::from_secs(60));
        assert!(!options.allow_insecure);
    }

    #[test]
    fn operations_cover_the_whole_table() {
        let client = client();
        let names: Vec<_> = client.operations().map(|(name, _)| name).collect();
        assert_eq!(names.len(), Operation::ALL.len());
        assert!(names.contains(&"getCoupons"));
        assert!(names.contains(&"deletePayment"));
        for (name, bound) in client.operations() {
            assert_eq!(bound.operation().name(), name);
        }
    }

    #[tokio::test]
    async fn named_methods_send_the_expected_requests() {
        let client = client();
        client
            .update_coupon("abc123", &json!({ "discount": 10 }))
            .await
            .unwrap();
        client.delete_product("p1").await.unwrap();
        client
            .create_payment(&json!({ "title": "Order", "gateway": "Bitcoin" }))
            .await
            .unwrap();
        client.get_product_groups().await.unwrap();

        let sent = client.transport().sent();
        assert_eq!(sent.len(), 4);

        assert_eq!(sent[0].method, HttpMethod::Put);
        assert_eq!(sent[0].path, "/coupons/abc123");
        assert_eq!(sent[0].body, Some(json!({ "coupon": { "discount": 10 } })));

        assert_eq!(sent[1].method, HttpMethod::Delete);
        assert_eq!(sent[1].path, "/products/p1");
        assert_eq!(sent[1].body, None);

        assert_eq!(sent[2].method, HttpMethod::Post);
        assert_eq!(sent[2].path, "/pay");
        assert_eq!(
            sent[2].body,
            Some(json!({ "title": "Order", "gateway": "Bitcoin" }))
        );

        assert_eq!(sent[3].method, HttpMethod::Get);
        assert_eq!(sent[3].path, "/product_groups");
    }

    #[tokio::test]
    async fn bound_operation_validates_locally() {
        let client = client();
        let result = client.operation(Operation::GetQuery).call(Args::None).await;
        assert!(matches!(
            result,
            Err(SellyError::MissingIdentifier {
                operation: "getQuery"
            })
        ));
        assert!(client.transport().sent().is_empty());
    }

    #[tokio::test]
    async fn call_generic_deserializes_the_payload() {
        let client = client();
        client.transport().push(Ok(json!([{
            "id": "c1",
            "coupon": "SALE",
            "discount": 15.0,
            "max_use": null,
            "uses": 3,
            "product_ids": ["p1"],
            "created_at": "2018-01-01T00:00:00Z",
            "updated_at": "2018-01-02T00:00:00Z"
        }])));

        let coupons = client
            .call_generic::<Vec<Coupon>>(Operation::GetCoupons, Args::None)
            .await
            .unwrap();
        assert_eq!(coupons.len(), 1);
        assert_eq!(coupons[0].coupon, "SALE");
        assert_eq!(coupons[0].max_use, None);
    }

    #[tokio::test]
    async fn call_generic_reports_mismatched_payloads() {
        let client = client();
        client.transport().push(Ok(json!({ "unexpected": true })));
        let result = client
            .call_generic::<Vec<Coupon>>(Operation::GetCoupons, Args::None)
            .await;
        assert!(matches!(result, Err(SellyError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn concurrent_calls_share_the_client() {
        let client = client();
        let calls = ["o1", "o2", "o3"].map(|id| {
            let client = client.clone();
            async move { client.get_order(id).await }
        });
        let results = futures::future::join_all(calls).await;
        assert!(results.iter().all(Result::is_ok));

        let mut paths: Vec<_> = client
            .transport()
            .sent()
            .into_iter()
            .map(|request| request.path)
            .collect();
        paths.sort();
        assert_eq!(paths, ["/orders/o1", "/orders/o2", "/orders/o3"]);
    }

    #[tokio::test]
    async fn transport_errors_surface_normalized() {
        let client = client();
        client
            .transport()
            .push(Err(TransportFailure::status(401, "Unauthorized")));
        let error = client.get_orders().await.unwrap_err();
        assert_eq!(
            error.as_normalized(),
            Some(&crate::NormalizedError::new("Unauthorized", 401))
        );
    }
}
