/// Generate a router async method that selects providers and calls a
/// single-provider method. Fallback and error collapsing happen in
/// `Dashboard::fetch_single`.
///
/// The orchestrator formats the final not-found error as
/// "{capability} for {SYMBOL}".
#[macro_export]
macro_rules! quantdash_router_method {
    (
        $(#[$meta:meta])*
        method: $name:ident( $sym_ident:ident : $sym_ty:ty $(, $arg_ident:ident : $arg_ty:ty )* ) -> $ret:ty,
        accessor: $accessor:ident,
        capability: $capability:expr,
        call: $call_name:ident( $call_first:ident $(, $call_rest:ident )* )
    ) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "tracing",
            tracing::instrument(
                target = "quantdash::router",
                skip(self, $sym_ident $(, $arg_ident)*),
                fields(symbol = %$sym_ident),
            )
        )]
        ///
        /// # Errors
        /// Returns an error if no eligible provider succeeds or none support the capability.
        pub async fn $name(
            &self,
            $sym_ident: $sym_ty,
            $( $arg_ident: $arg_ty ),*
        ) -> Result<$ret, quantdash_core::DashError> {
            self.fetch_single(
                $sym_ident,
                $capability,
                move |c, s| {
                    c.$accessor()?;
                    $( let $arg_ident = $arg_ident.clone(); )*
                    Some(async move {
                        match c.$accessor() {
                            Some(p) => p.$call_name(&s $(, $call_rest )*).await,
                            None => Err(quantdash_core::DashError::connector(
                                c.name(),
                                format!("missing {} capability during call", $capability),
                            )),
                        }
                    })
                },
            )
            .await
        }
    };
}
