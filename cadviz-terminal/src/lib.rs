/// Terminal host for the cadviz core: input, frame loop and presentation
use cadviz_core::{CameraState, RenderContext, Scene};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self},
};
use log::info;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;
pub mod scenes;

pub use renderer::{AsciiRenderer, ColorMode, CELL_HEIGHT, CELL_WIDTH};
pub use scenes::{SceneKind, SceneOptions};

/// Radians per key press
const KEY_ROTATION_STEP: f64 = 0.1;

/// Host configuration
#[derive(Debug, Clone, Copy)]
pub struct AppSettings {
    pub camera: CameraState,
    pub fps: u32,
    pub fov: f64,
    pub color_mode: ColorMode,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            camera: CameraState::default(),
            fps: 60,
            fov: cadviz_core::projection::DEFAULT_FOV,
            color_mode: ColorMode::default(),
        }
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    camera: CameraState,
    context: RenderContext,
    renderer: AsciiRenderer,
    target_fps: u32,
    running: bool,
    paused: bool,
    drag_anchor: Option<(u16, u16)>,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene, settings: AppSettings) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, settings, width, height))
    }

    /// Build without querying the terminal
    pub fn with_size(scene: Scene, settings: AppSettings, width: u16, height: u16) -> Self {
        let renderer = AsciiRenderer::with_mode(width as usize, height as usize, settings.color_mode);
        let context = RenderContext {
            viewport: renderer.viewport(),
            fov: settings.fov,
            ..Default::default()
        };

        Self {
            scene,
            camera: settings.camera,
            context,
            renderer,
            target_fps: settings.fps.max(1),
            running: true,
            paused: false,
            drag_anchor: None,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;
        info!(
            "starting: {}x{} cells, viewport {}x{}",
            self.renderer.width(),
            self.renderer.height(),
            self.context.viewport.width,
            self.context.viewport.height
        );

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;
        info!("stopped");

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_secs(1) / self.target_fps;

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            // Update
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Apply one input event to the camera or app state
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) {
        if kind == KeyEventKind::Release {
            return;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => {
                self.camera.rotate(KEY_ROTATION_STEP, 0.0, 0.0);
            }
            KeyCode::Char('s') | KeyCode::Down => {
                self.camera.rotate(-KEY_ROTATION_STEP, 0.0, 0.0);
            }
            KeyCode::Char('a') | KeyCode::Left => {
                self.camera.rotate(0.0, -KEY_ROTATION_STEP, 0.0);
            }
            KeyCode::Char('d') | KeyCode::Right => {
                self.camera.rotate(0.0, KEY_ROTATION_STEP, 0.0);
            }
            KeyCode::Char('z') => {
                self.camera.rotate(0.0, 0.0, KEY_ROTATION_STEP);
            }
            KeyCode::Char('c') => {
                self.camera.rotate(0.0, 0.0, -KEY_ROTATION_STEP);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.camera.zoom(-1.0);
            }
            KeyCode::Char('-') => {
                self.camera.zoom(1.0);
            }
            KeyCode::Char('i') => {
                self.camera = CameraState::isometric();
            }
            KeyCode::Char('r') => {
                self.camera.reset_rotation();
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.paused = !self.paused;
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, MouseEvent { kind, column, row, .. }: MouseEvent) {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_anchor = Some((column, row));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((last_column, last_row)) = self.drag_anchor {
                    let dx = (column as f64 - last_column as f64) * CELL_WIDTH as f64;
                    let dy = (row as f64 - last_row as f64) * CELL_HEIGHT as f64;
                    self.camera.drag(dx, dy);
                }
                self.drag_anchor = Some((column, row));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_anchor = None;
            }
            MouseEventKind::ScrollUp => {
                self.camera.zoom(1.0);
            }
            MouseEventKind::ScrollDown => {
                self.camera.zoom(-1.0);
            }
            _ => {}
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.renderer =
            AsciiRenderer::with_mode(width as usize, height as usize, self.renderer.mode());
        self.context.viewport = self.renderer.viewport();
    }

    /// Physics runs once per frame, before anything is drawn
    pub fn update(&mut self) {
        if !self.paused {
            self.scene.step();
        }
    }

    /// HUD text: zoom, angles in degrees, frame rate
    pub fn status_line(&self) -> String {
        let rotation = &self.camera.rotation;
        format!(
            "Zoom: {:.0} | angle_x: {:.2}° | angle_y: {:.2}° | angle_z: {:.2}° | FPS: {:.1}{}",
            100.0 - self.camera.viewer_distance,
            rotation.x.to_degrees(),
            rotation.y.to_degrees(),
            rotation.z.to_degrees(),
            self.fps,
            if self.paused { " | PAUSED" } else { "" }
        )
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear renderer
        self.renderer.clear();

        // Render scene
        self.scene.render(&self.camera, &self.context, &mut self.renderer);

        // Output to terminal
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetBackgroundColor(Color::Black),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            cursor::MoveTo(0, 1),
            Print("WASD/Arrows/drag=Rotate Z/C=Roll +/-/wheel=Zoom I=Iso R=Reset P=Pause Q=Quit"),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
