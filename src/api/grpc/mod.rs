use std::pin::Pin;
use std::sync::Arc;

use tokio_stream::Stream;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tonic::{Request, Response, Status};

use crate::engine::acceptance::accept_load;
use crate::engine::search::{SearchParams, search_board};
use crate::models::notification::Notification;
use crate::state::AppState;

pub mod pb {
    tonic::include_proto!("carga");
}

use pb::marketplace_service_server::MarketplaceService;
use pb::{
    AcceptLoadRequest, AcceptLoadResponse, Coords, GetStatsRequest, ListLoadsRequest,
    ListLoadsResponse, NotificationEvent, StatsResponse, WatchNotificationsRequest,
};

pub struct GrpcMarketplaceService {
    state: Arc<AppState>,
}

impl GrpcMarketplaceService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

fn coords_to_proto(c: &crate::models::load::Coords) -> Coords {
    Coords {
        lng: c.lng(),
        lat: c.lat(),
    }
}

fn load_to_proto(l: &crate::models::load::Load) -> pb::Load {
    pb::Load {
        id: l.id.clone(),
        origin: l.origin.clone(),
        destination: l.destination.clone(),
        origin_coords: Some(coords_to_proto(&l.origin_coords)),
        destination_coords: Some(coords_to_proto(&l.destination_coords)),
        weight_tons: l.weight_tons,
        distance_km: l.distance_km,
        price: l.price,
        kind: l.kind.as_str().to_string(),
        description: l.description.clone(),
        price_per_km: l.price_per_km(),
    }
}

fn shipment_to_proto(s: &crate::models::shipment::Shipment) -> pb::Shipment {
    pb::Shipment {
        id: s.id.clone(),
        origin: s.origin.clone(),
        destination: s.destination.clone(),
        weight_tons: s.weight_tons,
        price: s.price,
        status: s.status.as_str().to_string(),
        progress: s.progress as u32,
        carrier: s.carrier.clone(),
    }
}

fn notification_to_proto(n: &Notification) -> NotificationEvent {
    NotificationEvent {
        id: n.id.to_string(),
        kind: n.kind.as_str().to_string(),
        message: n.message.clone(),
        created_at: n.created_at.to_rfc3339(),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

#[tonic::async_trait]
impl MarketplaceService for GrpcMarketplaceService {
    async fn list_loads(
        &self,
        request: Request<ListLoadsRequest>,
    ) -> Result<Response<ListLoadsResponse>, Status> {
        let req = request.into_inner();

        let params = SearchParams {
            tipo: non_empty(req.kind),
            peso_min: req.weight_min,
            peso_max: req.weight_max,
            precio_km_min: req.min_price_per_km,
            distancia_max: req.max_distance_km,
            q: non_empty(req.search),
            sort: non_empty(req.sort),
            visible: req.visible.map(|v| v as usize),
        };

        let page = search_board(&self.state, &params, "grpc")?;

        Ok(Response::new(ListLoadsResponse {
            loads: page.cargas.iter().map(load_to_proto).collect(),
            total: page.total as u32,
            visible: page.visible as u32,
        }))
    }

    async fn accept_load(
        &self,
        request: Request<AcceptLoadRequest>,
    ) -> Result<Response<AcceptLoadResponse>, Status> {
        let req = request.into_inner();

        if req.load_id.trim().is_empty() {
            return Err(Status::invalid_argument("load_id cannot be empty"));
        }

        let shipment = accept_load(&self.state, &req.load_id, Some(req.carrier.as_str()))?;

        Ok(Response::new(AcceptLoadResponse {
            shipment: Some(shipment_to_proto(&shipment)),
        }))
    }

    async fn get_stats(
        &self,
        _request: Request<GetStatsRequest>,
    ) -> Result<Response<StatsResponse>, Status> {
        let stats = self.state.stats();

        Ok(Response::new(StatsResponse {
            available_loads: stats.available_loads,
            shipments_in_progress: stats.shipments_in_progress,
            completed_this_month: stats.completed_this_month,
            active_carriers: stats.active_carriers,
        }))
    }

    type WatchNotificationsStream =
        Pin<Box<dyn Stream<Item = Result<NotificationEvent, Status>> + Send>>;

    async fn watch_notifications(
        &self,
        _request: Request<WatchNotificationsRequest>,
    ) -> Result<Response<Self::WatchNotificationsStream>, Status> {
        let rx = self.state.notification_tx.subscribe();
        let stream = BroadcastStream::new(rx).filter_map(|result| match result {
            Ok(notification) => Some(Ok(notification_to_proto(&notification))),
            Err(_) => None,
        });

        Ok(Response::new(Box::pin(stream)))
    }
}
