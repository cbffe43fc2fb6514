use crate::journey::{Journey, JourneyAnalytics, Metric, Signature, Step, Trend};

/// The static sample journeys shipped with the crate.
pub fn sample_journeys() -> Vec<Journey> {
    vec![checkout_journey(), onboarding_journey(), support_journey()]
}

fn checkout_journey() -> Journey {
    Journey {
        id: "checkout".to_string(),
        title: "E-commerce Checkout".to_string(),
        description: "From product discovery to a confirmed order.".to_string(),
        value_stream: Some("Revenue".to_string()),
        metrics_start_date: Some("2024-01-01".to_string()),
        analytics: Some(JourneyAnalytics {
            total_users: Some(48_210),
            completion_rate: Some(31.4),
            average_duration: Some("6m 12s".to_string()),
        }),
        steps: vec![
            Step::new("browse", "Browse Products")
                .with_phase("Discovery")
                .with_icon("search")
                .with_description("Visitor lands on a category page and browses items.")
                .with_metric(Metric::new("Sessions", "48,210", Trend::Up))
                .with_metric(Metric::new("Bounce rate", "38%", Trend::Down))
                .with_signature(Signature::new("page_view").with_matcher("path", "starts with", "/products")),
            Step::new("cart", "Add to Cart")
                .with_phase("Consideration")
                .with_icon("cart")
                .with_description("An item is added to the cart.")
                .with_detail("Cart additions spike on mobile after promotional emails go out.")
                .with_metric(Metric::new("Add-to-cart rate", "12.5%", Trend::Up))
                .with_signature(Signature::new("cart_item_added")),
            Step::new("checkout", "Checkout")
                .with_phase("Conversion")
                .with_icon("credit-card")
                .with_description("Shipping and payment details are entered.")
                .with_metric(Metric::new("Drop-off", "41%", Trend::Down))
                .with_signature(Signature::new("checkout_started").with_matcher("plan", "=", "guest")),
            Step::new("confirmation", "Order Confirmation")
                .with_phase("Completion")
                .with_icon("check")
                .with_description("The order is placed and a receipt is shown.")
                .with_metric(Metric::new("Orders", "15,138", Trend::Neutral)),
        ],
    }
}

fn onboarding_journey() -> Journey {
    Journey::new("onboarding", "SaaS Onboarding")
        .with_description("New account activation in the first week.")
        .with_value_stream("Growth")
        .with_step(
            Step::new("signup", "Sign Up")
                .with_phase("Acquisition")
                .with_description("Account created from the pricing page.")
                .with_metric(Metric::new("Signups", "3,420", Trend::Up)),
        )
        .with_step(
            Step::new("verify", "Verify Email")
                .with_phase("Activation")
                .with_description("Confirmation link clicked."),
        )
        .with_step(
            Step::new("first-project", "Create First Project")
                .with_phase("Activation")
                .with_description("The aha moment: a first project with real data.")
                .with_metric(Metric::new("Activation rate", "54%", Trend::Neutral)),
        )
}

fn support_journey() -> Journey {
    Journey::new("support", "Support Request")
        .with_description("Customer looks for help and reaches an agent.")
        .with_value_stream("Customer Success")
        .with_step(
            Step::new("help-center", "Visit Help Center")
                .with_phase("Self-service")
                .with_metric(Metric::new("Article views", "9,870", Trend::Up)),
        )
        .with_step(
            Step::new("ticket", "Open Ticket")
                .with_phase("Escalation")
                .with_metric(Metric::new("Tickets", "1,204", Trend::Down)),
        )
}
