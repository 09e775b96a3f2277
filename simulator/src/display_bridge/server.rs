use crate::display_bridge::model::{NoiseRequest, NoiseStatus};
use crate::workflow::config::NoiseRange;
use crate::workflow::runner::FrameSlot;
use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::json;
use std::{net::SocketAddr, thread};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};
use wavecore::{NoiseControl, SpectrumFrame};

/// State shared by the HTTP handlers.
#[derive(Clone)]
pub struct BridgeState {
    pub frames: FrameSlot,
    pub noise: NoiseControl,
    pub range: NoiseRange,
    pub adjustable: bool,
}

impl BridgeState {
    pub fn latest_frame(&self) -> SpectrumFrame {
        self.frames
            .read()
            .map(|frame| frame.clone())
            .unwrap_or_default()
    }

    pub fn noise_status(&self) -> NoiseStatus {
        NoiseStatus {
            sigma: self.noise.get(),
            adjustable: self.adjustable,
            range: self.range,
        }
    }

    /// Validates a requested noise level against the range and applies it.
    pub fn apply_noise(&self, request: &NoiseRequest) -> Result<NoiseStatus, (StatusCode, String)> {
        if !self.adjustable {
            return Err((
                StatusCode::CONFLICT,
                "noise control is disabled for this scenario".into(),
            ));
        }
        let sigma = match self.range.snap(request.sigma) {
            Some(sigma) => sigma,
            None => {
                let message = format!(
                    "sigma {} outside [{}, {}]",
                    request.sigma, self.range.min, self.range.max
                );
                self.noise.reject(&message);
                return Err((StatusCode::BAD_REQUEST, message));
            }
        };
        self.noise
            .set(sigma)
            .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;
        info!("noise sigma set to {:.2}", sigma);
        Ok(self.noise_status())
    }
}

/// `GET /frame`, `GET /noise` and `POST /noise`.
pub fn routes(
    state: BridgeState,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());

    let frame_route = warp::path("frame")
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: BridgeState| warp::reply::json(&state.latest_frame()));

    let noise_get_route = warp::path("noise")
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: BridgeState| warp::reply::json(&state.noise_status()));

    let noise_post_route = warp::path("noise")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter)
        .map(
            |request: NoiseRequest, state: BridgeState| match state.apply_noise(&request) {
                Ok(status) => {
                    warp::reply::with_status(warp::reply::json(&status), StatusCode::OK)
                }
                Err((code, message)) => {
                    warn!("noise update rejected: {}", message);
                    warp::reply::with_status(
                        warp::reply::json(&json!({ "status": "error", "message": message })),
                        code,
                    )
                }
            },
        );

    frame_route.or(noise_get_route).or(noise_post_route)
}

/// Hosts the display endpoints on a dedicated runtime thread.
pub struct DisplayBridge {
    address: SocketAddr,
}

impl DisplayBridge {
    /// Binds `address` before returning, so an unavailable port is reported
    /// to the caller instead of failing on the server thread.
    pub fn start(address: SocketAddr, state: BridgeState) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("building runtime for display bridge")?;

        let (bound, server) = {
            let _guard = runtime.enter();
            warp::serve(routes(state))
                .try_bind_ephemeral(address)
                .with_context(|| format!("binding display bridge to {}", address))?
        };

        thread::spawn(move || {
            runtime.block_on(server);
        });

        info!("display bridge listening on http://{}", bound);
        Ok(Self { address: bound })
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }
}
