use std::io;

use lander_client::{
    operations::service::list::{ImplementingServices, ServiceListRequest},
    LanderClientError,
};
use tower::{Service, ServiceExt};

use crate::LanderResult;

/// Where a single service list fetch stands.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FetchState<'a> {
    Loading,
    /// `None` when the graph reports no implementing services at all.
    Succeeded(Option<&'a ImplementingServices>),
    Failed(&'a LanderClientError),
}

/// Told about every state a fetch passes through, synchronously and in order.
pub(crate) trait FetchObserver {
    fn on_transition(&mut self, state: FetchState<'_>) -> io::Result<()>;
}

/// Drives one fetch from `Loading` to exactly one of `Succeeded` or `Failed`.
pub(crate) struct FetchController<'o, O> {
    observer: &'o mut O,
}

impl<'o, O: FetchObserver> FetchController<'o, O> {
    pub(crate) const fn new(observer: &'o mut O) -> Self {
        FetchController { observer }
    }

    /// Runs `request` through `service`, publishing `Loading` before the call and
    /// the outcome after it. A failed fetch comes back exactly as the service
    /// reported it.
    pub(crate) async fn fetch<S>(
        self,
        mut service: S,
        request: ServiceListRequest,
    ) -> LanderResult<Option<ImplementingServices>>
    where
        S: Service<
            ServiceListRequest,
            Response = Option<ImplementingServices>,
            Error = LanderClientError,
        >,
    {
        self.observer.on_transition(FetchState::Loading)?;

        let result = match service.ready().await {
            Ok(ready) => ready.call(request).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(implementing_services) => {
                self.observer
                    .on_transition(FetchState::Succeeded(implementing_services.as_ref()))?;
                Ok(implementing_services)
            }
            Err(err) => {
                tracing::debug!(error = ?err, "fetching the service list failed");
                if let Err(render_error) = self.observer.on_transition(FetchState::Failed(&err)) {
                    tracing::warn!(?render_error, "could not render the failed fetch");
                }
                Err(err.into())
            }
        }
    }
}
