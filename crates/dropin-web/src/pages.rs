//! # Page Rendering
//!
//! Inline HTML rendering for the three pages the server produces: the
//! payment page embedding the client token, the sale result page, and a
//! generic error page. Every user-supplied value passes through
//! [`escape_html`] before it reaches a page body.

use dropin_core::{SaleResult, TransactionStatus};

/// Minimal HTML entity escaper for text interpolated into page bodies.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <link rel="stylesheet" href="/public/styles.css">
</head>
<body>
    <main class="card">
{body}
    </main>
</body>
</html>
"#
    )
}

/// Payment page: drop-in container plus the form that posts the nonce and
/// amount to /proc. The client token is consumed by the drop-in script; it
/// is base64url material but escaped anyway.
pub fn payment_page(client_token: &str) -> String {
    let token = escape_html(client_token);
    let body = format!(
        r#"        <h1>Checkout</h1>
        <form id="payment-form" action="/proc" method="post">
            <label for="amount">Amount (USD)</label>
            <input type="text" name="amount" id="amount" value="10.00" required>
            <div id="dropin-container"></div>
            <input type="hidden" name="payment_method_nonce" id="payment_method_nonce">
            <button type="submit" id="submit-button" disabled>Pay</button>
        </form>
        <script src="https://js.braintreegateway.com/web/dropin/1.43.0/js/dropin.min.js"></script>
        <script>
            var form = document.getElementById('payment-form');
            var submitButton = document.getElementById('submit-button');
            braintree.dropin.create({{
                authorization: '{token}',
                container: '#dropin-container'
            }}, function (createErr, instance) {{
                if (createErr) {{ console.error(createErr); return; }}
                submitButton.disabled = false;
                form.addEventListener('submit', function (event) {{
                    event.preventDefault();
                    instance.requestPaymentMethod(function (err, payload) {{
                        if (err) {{ console.error(err); return; }}
                        document.getElementById('payment_method_nonce').value = payload.nonce;
                        form.submit();
                    }});
                }});
            }});
        </script>"#
    );
    shell("Checkout", &body)
}

/// Sale result page. Rendered with HTTP 200 for approvals and declines
/// alike; the business outcome lives in the body, not the status code.
pub fn result_page(result: &SaleResult, submitted_amount: &str, submitted_nonce: &str) -> String {
    let amount = escape_html(submitted_amount);
    let nonce = escape_html(submitted_nonce);

    let outcome = match result {
        SaleResult::Approved { transaction } => format!(
            r#"        <h1 class="ok">Payment successful</h1>
        <p>Transaction id: <code>{}</code></p>
        <p>Status: <code>{}</code></p>"#,
            escape_html(&transaction.id),
            escape_html(&status_label(&transaction.status)),
        ),
        SaleResult::Declined {
            transaction,
            message,
        } => {
            let txn_line = match transaction {
                Some(t) => format!(
                    "\n        <p>Transaction id: <code>{}</code></p>",
                    escape_html(&t.id)
                ),
                None => String::new(),
            };
            format!(
                r#"        <h1 class="err">Payment declined</h1>
        <p>Reason: {}</p>{txn_line}"#,
                escape_html(message),
            )
        }
    };

    let body = format!(
        r#"{outcome}
        <h2>Submitted</h2>
        <dl>
            <dt>amount</dt><dd>{amount}</dd>
            <dt>payment_method_nonce</dt><dd><code>{nonce}</code></dd>
        </dl>
        <p><a href="/">Back to checkout</a></p>"#
    );
    shell("Payment Result", &body)
}

/// Generic error page (validation failures, gateway unavailability).
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        r#"        <h1 class="err">{}</h1>
        <p>{}</p>
        <p><a href="/">Back to checkout</a></p>"#,
        escape_html(title),
        escape_html(message),
    );
    shell(title, &body)
}

fn status_label(status: &TransactionStatus) -> String {
    match status {
        TransactionStatus::Unknown(s) => s.clone(),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropin_core::Transaction;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("10.00"), "10.00");
        assert_eq!(escape_html("a&b'c"), "a&amp;b&#39;c");
    }

    #[test]
    fn test_payment_page_embeds_token() {
        let page = payment_page("tok_abc123");
        assert!(page.contains("tok_abc123"));
        assert!(page.contains(r#"action="/proc" method="post""#));
        assert!(page.contains("payment_method_nonce"));
    }

    #[test]
    fn test_result_page_escapes_submitted_fields() {
        let result = SaleResult::Declined {
            transaction: None,
            message: "Do Not Honor".to_string(),
        };
        let page = result_page(&result, "10.00", "<script>bad</script>");
        assert!(!page.contains("<script>bad"));
        assert!(page.contains("&lt;script&gt;bad"));
        assert!(page.contains("Do Not Honor"));
    }

    #[test]
    fn test_result_page_shows_transaction_id() {
        let result = SaleResult::Approved {
            transaction: Transaction {
                id: "txn_42".to_string(),
                status: dropin_core::TransactionStatus::SubmittedForSettlement,
                amount: "10.00".to_string(),
                currency: Some("USD".to_string()),
                processor_response: None,
                created_at: None,
            },
        };
        let page = result_page(&result, "10.00", "fake-valid-nonce");
        assert!(page.contains("txn_42"));
        assert!(page.contains("Payment successful"));
    }
}
