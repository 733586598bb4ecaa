/// Generate a router async method that selects providers for one stock and
/// calls a single-provider method. Fallback, racing and not-found collapsing
/// are handled by the orchestrator's `fetch_single`.
///
/// Notes on `not_found` label:
/// - Pass a noun only (e.g., "monthly revenue", "daily prices").
/// - The orchestrator formats the final error as "{label} for {STOCK_ID}".
#[macro_export]
macro_rules! caibao_router_method {
    (
        $(#[$meta:meta])*
        method: $name:ident( $stock_ident:ident : $stock_ty:ty $(, $arg_ident:ident : $arg_ty:ty )* ) -> $ret:ty,
        accessor: $accessor:ident,
        capability: $capability:expr,
        not_found: $not_found:expr,
        call: $call_name:ident( $call_first:ident $(, $call_rest:ident )* )
    ) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "tracing",
            tracing::instrument(
                target = "caibao::router",
                skip(self, $stock_ident $(, $arg_ident)*),
                fields(stock_id = %$stock_ident.stock_id),
            )
        )]
        ///
        /// # Errors
        /// Returns an error if no eligible provider succeeds or none support the capability.
        pub async fn $name(
            &self,
            $stock_ident: $stock_ty,
            $( $arg_ident: $arg_ty ),*
        ) -> Result<$ret, caibao_core::CaibaoError> {
            self.fetch_single(
                $stock_ident,
                $capability,
                $not_found,
                move |c, s| {
                    c.$accessor()?;
                    $( let $arg_ident = $arg_ident.clone(); )*
                    Some(async move {
                        if let Some(p) = c.$accessor() {
                            p.$call_name(&s $(, $call_rest )*).await
                        } else {
                            Err(caibao_core::CaibaoError::connector(
                                c.name(),
                                concat!("missing ", stringify!($accessor), " during call"),
                            ))
                        }
                    })
                },
            )
            .await
        }
    };
}
