use selly_rs::models::{Coupon, Payment, Gateway};
use selly_rs::{Args, ClientOptions, Operation, SellyClient};
use serde_json::json;

async fn get_json_value(client: &SellyClient) {
    let products = client.get_products().await.unwrap();

    println!("{:#?}", products);
}

async fn get_deserialized_value(client: &SellyClient) {
    let coupons = client
        .call_generic::<Vec<Coupon>>(Operation::GetCoupons, Args::None)
        .await
        .unwrap();

    for coupon in &coupons {
        println!("{} ({} uses)", coupon.coupon, coupon.uses);
    }

    if let Some(coupon) = coupons.first() {
        let updated = client
            .update_coupon(&coupon.id, &json!({ "discount": 10 }))
            .await
            .unwrap();
        println!("{:#?}", updated);
    }
}

async fn create_payment(client: &SellyClient) {
    let payment = Payment {
        title: Some("Donation".to_string()),
        gateway: Some(Gateway::Paypal),
        email: Some("buyer@example.com".to_string()),
        value: Some(5.0),
        currency: Some("USD".to_string()),
        ..Default::default()
    };

    match client.create_payment(&payment).await {
        Ok(created) => println!("pay at {}", created["url"]),
        Err(error) => eprintln!("{}", error),
    }
}

#[tokio::main]
async fn main() {
    let email = std::env::var("SELLY_EMAIL").expect("SELLY_EMAIL not set");
    let api_key = std::env::var("SELLY_API_KEY").expect("SELLY_API_KEY not set");

    let client = SellyClient::create(
        &email,
        &api_key,
        ClientOptions::builder().user_agent("selly-rs-demo").build(),
    )
    .expect("failed to create client");

    get_json_value(&client).await;
    get_deserialized_value(&client).await;
    create_payment(&client).await;
}
