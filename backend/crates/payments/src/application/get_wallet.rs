//! Get Wallet Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::Wallet;
use crate::domain::repository::WalletRepository;
use crate::error::PaymentsResult;

pub struct GetWalletUseCase<W>
where
    W: WalletRepository,
{
    wallet_repo: Arc<W>,
}

impl<W> GetWalletUseCase<W>
where
    W: WalletRepository,
{
    pub fn new(wallet_repo: Arc<W>) -> Self {
        Self { wallet_repo }
    }

    pub async fn execute(&self, user_id: UserId) -> PaymentsResult<Wallet> {
        self.wallet_repo.get_or_create(&user_id).await
    }
}
