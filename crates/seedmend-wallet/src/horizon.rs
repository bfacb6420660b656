//! Horizon account balance client

use std::time::Duration;

use reqwest::StatusCode;
use seedmend_crypto::strkey;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::WalletError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Native balance of one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub account_id: String,
    /// Decimal string as returned by Horizon
    pub native: String,
}

/// Response from `GET /accounts/{id}`
#[derive(Debug, Deserialize)]
struct AccountResponse {
    balances: Vec<BalanceLine>,
}

#[derive(Debug, Deserialize)]
struct BalanceLine {
    balance: String,
    asset_type: String,
}

/// Minimal Horizon client
#[derive(Debug, Clone)]
pub struct HorizonClient {
    base_url: String,
    client: reqwest::Client,
}

impl HorizonClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, WalletError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetch the native balance of `account_id`
    pub async fn balance(&self, account_id: &str) -> Result<Balance, WalletError> {
        strkey::decode(strkey::VERSION_ACCOUNT_ID, account_id)
            .map_err(|e| WalletError::InvalidAccount(account_id.to_string(), e))?;

        let url = format!("{}/accounts/{}", self.base_url, account_id);
        debug!(%url, "Fetching account");

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(WalletError::AccountNotFound(account_id.to_string()));
        }
        let body = response.error_for_status()?.text().await?;

        Ok(Balance {
            account_id: account_id.to_string(),
            native: parse_native_balance(&body)?,
        })
    }
}

/// Extract the native balance from an account JSON document
pub fn parse_native_balance(body: &str) -> Result<String, WalletError> {
    let account: AccountResponse =
        serde_json::from_str(body).map_err(|e| WalletError::InvalidResponse(e.to_string()))?;

    account
        .balances
        .into_iter()
        .find(|b| b.asset_type == "native")
        .map(|b| b.balance)
        .ok_or_else(|| WalletError::InvalidResponse("no native balance".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const ACCOUNT: &str = "GDRXE2BQUC3AZNPVFSCEZ76NJ3WWL25FYFK6RGZGIEKWE4SOOHSUJUJ6";
    const UNFUNDED: &str = "GB3JDWCQJCWMJ3IILWIGDTQJJC5567PGVEVXSCVPEQOTDN64VJBDQBYX";

    const ACCOUNT_JSON: &str = r#"{
        "id": "GDRXE2BQUC3AZNPVFSCEZ76NJ3WWL25FYFK6RGZGIEKWE4SOOHSUJUJ6",
        "balances": [
            {"balance": "12.5000000", "asset_type": "credit_alphanum4", "asset_code": "USD"},
            {"balance": "314.1592000", "asset_type": "native"}
        ]
    }"#;

    /// Serve exactly one HTTP response on a random local port
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}", addr)
    }

    // Bypass any proxy configured in the environment
    fn local_client(url: String) -> HorizonClient {
        HorizonClient {
            base_url: url,
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
        }
    }

    #[test]
    fn test_parse_native_balance() {
        assert_eq!(parse_native_balance(ACCOUNT_JSON).unwrap(), "314.1592000");
    }

    #[test]
    fn test_parse_without_native() {
        let body = r#"{"balances": [{"balance": "1.0", "asset_type": "credit_alphanum4"}]}"#;
        assert!(matches!(parse_native_balance(body), Err(WalletError::InvalidResponse(_))));
        assert!(matches!(parse_native_balance("not json"), Err(WalletError::InvalidResponse(_))));
    }

    #[test]
    fn test_base_url_trimmed() {
        let client = HorizonClient::new("https://api.mainnet.minepi.com/").unwrap();
        assert_eq!(client.base_url, "https://api.mainnet.minepi.com");
    }

    #[tokio::test]
    async fn test_balance_lookup() {
        let url = serve_once("200 OK", ACCOUNT_JSON).await;
        let client = local_client(url);

        let balance = client.balance(ACCOUNT).await.unwrap();
        assert_eq!(balance.native, "314.1592000");
        assert_eq!(balance.account_id, ACCOUNT);
    }

    #[tokio::test]
    async fn test_account_not_found() {
        let url = serve_once("404 Not Found", r#"{"status": 404}"#).await;
        let client = local_client(url);

        let err = client.balance(UNFUNDED).await.unwrap_err();
        assert!(matches!(err, WalletError::AccountNotFound(id) if id == UNFUNDED));
    }

    #[tokio::test]
    async fn test_server_error() {
        let url = serve_once("500 Internal Server Error", "{}").await;
        let client = local_client(url);
        assert!(matches!(client.balance(ACCOUNT).await, Err(WalletError::Network(_))));
    }

    #[tokio::test]
    async fn test_malformed_account_rejected() {
        // Nothing listens here; the id is rejected before any request
        let client = local_client("http://127.0.0.1:9".to_string());

        let err = client.balance("GABC").await.unwrap_err();
        assert!(matches!(err, WalletError::InvalidAccount(id, _) if id == "GABC"));

        let mut corrupted = ACCOUNT.to_string();
        corrupted.replace_range(55.., "7");
        assert!(matches!(
            client.balance(&corrupted).await,
            Err(WalletError::InvalidAccount(..))
        ));
    }
}
