use nodelens_camera::{CameraEngine, CameraOptions, ViewClock, ZoomCache};
use nodelens_core::geom::{WheelDeltaMode, wheel_zoom_factor};
use nodelens_core::{
    CameraTransform, ChartConfig, Layout, LayoutEdges, LayoutIdentity, LayoutNodes, Point,
    Viewport, ViewportMetrics, compute_focus_layout, default_zoom, focus_settings, neighbor_ids,
    viewport_center, zoom_limits,
};
use nodelens_layout::{GraphNodes, GridLayouter, LayoutOptions, Layouter, graph_layout, validate};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error(transparent)]
    Config(#[from] nodelens_core::Error),
    #[error(transparent)]
    Layout(#[from] nodelens_layout::Error),
}

pub type ChartResult<T> = std::result::Result<T, ChartError>;

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartFrame {
    pub nodes: LayoutNodes,
    pub edges: LayoutEdges,
    pub selected_scale: f64,
    pub transform: CameraTransform,
    /// `transform` as an SVG `transform` attribute value.
    pub svg_transform: String,
    /// Off for graphs above the complexity threshold, where transitions get too expensive.
    pub is_animated: bool,
}

/// Headless nodes chart: owns the full layout, the selection and the camera, and derives render
/// frames from them.
///
/// Event handlers only update state. [`frame`](Self::frame) recomputes the focus layout from
/// scratch, so the full layout is never touched by selection changes.
pub struct NodesChart<C> {
    config: ChartConfig,
    viewport: Viewport,
    panel_open: bool,
    layouter: Box<dyn Layouter>,
    input: Option<(GraphNodes, LayoutOptions)>,
    layout: Layout,
    selected: Option<String>,
    camera: CameraEngine<C>,
}

impl<C: ZoomCache> NodesChart<C> {
    pub fn new(config: ChartConfig, viewport: Viewport, cache: C, clock: ViewClock) -> Self {
        let options = CameraOptions::from_config(&config);
        Self {
            config,
            viewport,
            panel_open: false,
            layouter: Box::new(GridLayouter::default()),
            input: None,
            layout: Layout::default(),
            selected: None,
            camera: CameraEngine::new(cache, clock, options),
        }
    }

    pub fn with_layouter(mut self, layouter: impl Layouter + 'static) -> Self {
        self.layouter = Box::new(layouter);
        self.input = None;
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &CameraEngine<C> {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraEngine<C> {
        &mut self.camera
    }

    /// The unfocused layout, as produced by the last layout pass.
    pub fn full_layout(&self) -> &Layout {
        &self.layout
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Lays out `nodes` unless they and `options` are unchanged since the last call.
    ///
    /// The canvas geometry in `options` is overwritten with the chart's viewport and configured
    /// margins, so the layouter sees the canvas the camera fits to and a resize invalidates the
    /// memo. `options.force_relayout` bypasses the memo and resets the camera to its defaults.
    /// Returns whether a layout pass ran.
    pub fn update_graph(
        &mut self,
        nodes: GraphNodes,
        mut options: LayoutOptions,
    ) -> ChartResult<bool> {
        let force = options.force_relayout;
        options.force_relayout = false;
        options.width = self.viewport.width;
        options.height = self.viewport.height;
        options.margins = self.config.canvas_margins;

        let unchanged = self
            .input
            .as_ref()
            .is_some_and(|(n, o)| *n == nodes && *o == options);
        if unchanged && !force {
            tracing::trace!("graph input unchanged; layout reused");
            return Ok(false);
        }

        let layout = graph_layout(&nodes, &options, &*self.layouter)?;
        let identity = options.identity();
        self.layout = layout;
        self.input = Some((nodes, options));
        self.refresh_camera(identity, force);
        Ok(true)
    }

    /// Installs a layout computed elsewhere under `identity`.
    pub fn set_layout(
        &mut self,
        layout: Layout,
        identity: LayoutIdentity,
        force_relayout: bool,
    ) -> ChartResult<()> {
        validate(&layout)?;
        self.layout = layout;
        self.input = None;
        self.refresh_camera(identity, force_relayout);
        Ok(())
    }

    fn refresh_camera(&mut self, identity: LayoutIdentity, force_relayout: bool) {
        let margins = self.config.canvas_margins;
        let metrics = ViewportMetrics::new(self.viewport, &margins);
        let limits = zoom_limits(&self.layout.nodes, &metrics, &margins, &self.config.zoom);
        let defaults = default_zoom(&self.layout.nodes, &metrics, &margins)
            .unwrap_or(CameraTransform::IDENTITY);

        self.camera.set_default_transform(defaults);
        self.camera.cache_mut().set_limits(&identity, limits);
        self.camera.sync(identity, limits, force_relayout);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        if let Some(identity) = self.camera.identity().cloned() {
            self.refresh_camera(identity, false);
        }
    }

    pub fn set_details_panel_open(&mut self, open: bool) {
        self.panel_open = open;
    }

    pub fn select_node(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.camera.pan(dx, dy);
    }

    pub fn zoom_at_pointer(&mut self, pointer: Point, factor: f64) -> bool {
        self.camera.zoom_at_pointer(pointer, factor)
    }

    pub fn wheel(&mut self, pointer: Point, delta_y: f64, mode: WheelDeltaMode) -> bool {
        self.camera.zoom_at_pointer(pointer, wheel_zoom_factor(delta_y, mode))
    }

    pub fn set_scale(&mut self, scale: f64) -> bool {
        self.camera.set_scale(scale)
    }

    /// Lets a due camera write land. Returns whether one did.
    pub fn tick(&mut self) -> bool {
        self.camera.poll()
    }

    /// Drops any pending camera write; the chart is going away.
    pub fn unmount(&mut self) {
        self.camera.cancel_pending();
    }

    pub fn frame(&self) -> ChartFrame {
        let margins = &self.config.canvas_margins;
        let transform = *self.camera.transform();
        let selected = self.selected.as_deref();

        let neighbors = neighbor_ids(selected, &self.layout.nodes);
        let metrics = ViewportMetrics::new(self.viewport, margins);
        let settings = focus_settings(
            transform.scale_x,
            neighbors.len(),
            metrics.expanse,
            self.config.node_base_size,
        );
        let panel_width = if self.panel_open {
            self.config.details_panel_width
        } else {
            0.0
        };
        let center = viewport_center(self.viewport, margins, panel_width, &transform);
        let focused = compute_focus_layout(selected, &self.layout, center, &neighbors, &settings);

        ChartFrame {
            is_animated: self.layout.nodes.len() <= self.config.graph_complexity_nodes_threshold,
            nodes: focused.nodes,
            edges: focused.edges,
            selected_scale: focused.selected_scale,
            svg_transform: transform.to_svg_transform(),
            transform,
        }
    }
}
