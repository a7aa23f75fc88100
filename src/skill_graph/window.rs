//=========================================================================
// Skill Graph Window
//=========================================================================
//
// Menu window where a party member spends experience and items on skill
// nodes.
//
// State machine:
//   None ──set_active(true)──► CharacterSelect ──confirm──► Graph
//    ▲                            │      ▲                   │
//    └────────cancel──────────────┘      └──────cancel───────┘
//
// Graph frame: cancel? → scroll view → purchase on confirm → navigate
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::character::{Inventory, Party, SkillCharacter};
use super::graph::{ItemId, NodeId, SkillGraph, SkillNode};
use super::navigation::{navigate, Direction};
use crate::core::geometry::{lerp, Color, Position2D, Rect2D};
use crate::core::services::{AudioService, InputService, VideoService};

//=== Constants ===========================================================

pub const SKILL_GRAPH_AREA_WIDTH: f32 = 815.0;
pub const SKILL_GRAPH_AREA_HEIGHT: f32 = 415.0;
pub const WINDOW_BORDER_WIDTH: f32 = 18.0;
/// Extra space around the drawing area in which nodes are still kept.
pub const NODES_DISPLAY_MARGIN: f32 = 100.0;

const VIEW_SCROLL_FACTOR: f32 = 0.07;
const VIEW_SNAP_DISTANCE: f32 = 0.5;
const VISIBLE_REFRESH_INTERVAL: Duration = Duration::from_millis(200);

const DEFAULT_WINDOW_POSITION: Position2D = Position2D::new(89.0, 98.0);
const BOTTOM_MENU_POSITION: Position2D = Position2D::new(90.0, 565.0);
const BOTTOM_LINE_HEIGHT: f32 = 30.0;
const CHAR_SELECT_POSITION: Position2D = Position2D::new(72.0, 109.0);
const CHAR_SELECT_ROW_HEIGHT: f32 = 108.0;

const NODE_ICON_WIDTH: f32 = 36.0;
const CHARACTER_ICON_WIDTH: f32 = 32.0;
const POINTER_IMAGE: &str = "data/gui/menus/hand_down.png";
const POINTER_WIDTH: f32 = 24.0;
const POINTER_HEIGHT: f32 = 32.0;
const CURSOR_IMAGE: &str = "data/gui/menus/cursor.png";

const GRAYED_PATH: Color = Color::rgba(0.4, 0.4, 0.4, 0.2);
const NODE_BLUE: Color = Color::rgba(0.0, 0.0, 0.8, 0.7);
const WINDOW_BACKGROUND: Color = Color::rgba(0.05, 0.05, 0.15, 0.9);

const SOUND_BUMP: &str = "bump";
const SOUND_CONFIRM: &str = "confirm";

//=== WindowState =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    None,
    CharacterSelect,
    Graph,
}

//=== Purchase Outcome ====================================================

/// Why a node could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotEnoughExperience { needed: u32, available: u32 },
    MissingItem(ItemId),
    NotEnoughItems { item: ItemId, needed: u32, held: u32 },
    /// The character already stands on the node.
    CharacterLocation,
    AlreadyObtained,
    NoObtainedNeighbor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Obtained(NodeId),
    Rejected(RejectReason),
}

/// Checks every purchase rule, in the order the player is told about them.
pub fn check_purchase(node: &SkillNode, character: &SkillCharacter, inventory: &Inventory) -> Result<(), RejectReason> {
    let available = character.unspent_experience();
    if available < node.experience_needed() {
        return Err(RejectReason::NotEnoughExperience {
            needed: node.experience_needed(),
            available,
        });
    }

    for &(item, needed) in node.items_needed() {
        match inventory.count(item) {
            None => return Err(RejectReason::MissingItem(item)),
            Some(held) if held < needed => return Err(RejectReason::NotEnoughItems { item, needed, held }),
            Some(_) => {}
        }
    }

    if character.location() == node.id() {
        return Err(RejectReason::CharacterLocation);
    }
    if character.is_obtained(node.id()) {
        return Err(RejectReason::AlreadyObtained);
    }

    let has_neighbor = node
        .children()
        .iter()
        .chain(node.parents())
        .any(|&neighbor| character.is_obtained(neighbor));
    if !has_neighbor {
        return Err(RejectReason::NoObtainedNeighbor);
    }

    Ok(())
}

//=== Display Types =======================================================

/// A link between two nodes in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLine {
    pub begin: Position2D,
    pub end: Position2D,
}

/// What the bottom window shows about the selected node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BottomInfo {
    pub node: NodeId,
    pub experience_needed: u32,
    pub unspent_experience: u32,
    pub obtained: bool,
}

//=== SkillGraphWindow ====================================================

#[derive(Debug)]
pub struct SkillGraphWindow {
    graph: SkillGraph,
    party: Party,
    inventory: Inventory,
    position: Position2D,

    //--- Selection ---------------------------------------------------------
    state: WindowState,
    active: bool,
    char_selection: usize,
    selected_character: Option<usize>,
    selected_node: Option<NodeId>,
    character_node: Option<NodeId>,

    //--- View ----------------------------------------------------------------
    current_offset: Option<Position2D>,
    view_position: Position2D,
    refresh_timer: Duration,
    displayed_nodes: Vec<NodeId>,
    links: Vec<NodeLine>,
    colored_links: Vec<NodeLine>,

    bottom_info: Option<BottomInfo>,
    last_purchase: Option<PurchaseOutcome>,
}

impl SkillGraphWindow {
    //--- Construction -----------------------------------------------------

    pub fn new(graph: SkillGraph, party: Party, inventory: Inventory) -> Self {
        Self {
            graph,
            party,
            inventory,
            position: DEFAULT_WINDOW_POSITION,
            state: WindowState::None,
            active: false,
            char_selection: 0,
            selected_character: None,
            selected_node: None,
            character_node: None,
            current_offset: None,
            view_position: Position2D::default(),
            refresh_timer: Duration::ZERO,
            displayed_nodes: Vec::new(),
            links: Vec::new(),
            colored_links: Vec::new(),
            bottom_info: None,
            last_purchase: None,
        }
    }

    pub fn with_position(mut self, position: Position2D) -> Self {
        self.position = position;
        self
    }

    //--- Activation -------------------------------------------------------

    /// Activating enters character selection; deactivating hides the window.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.state = if active {
            WindowState::CharacterSelect
        } else {
            WindowState::None
        };
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    //--- Update -----------------------------------------------------------

    pub fn update(&mut self, input: &dyn InputService, audio: &mut dyn AudioService, elapsed: Duration) {
        if !self.active {
            return;
        }

        match self.state {
            WindowState::None => {}
            WindowState::CharacterSelect => self.update_character_select(input, elapsed),
            WindowState::Graph => self.update_graph(input, audio, elapsed),
        }
    }

    fn update_character_select(&mut self, input: &dyn InputService, elapsed: Duration) {
        if input.cancel_press() {
            self.set_active(false);
            return;
        }

        if input.up_press() {
            self.char_selection = self.char_selection.saturating_sub(1);
        } else if input.down_press() {
            if self.char_selection + 1 < self.party.len() {
                self.char_selection += 1;
            }
        } else if input.confirm_press() {
            if !self.select_character() {
                return;
            }
            self.state = WindowState::Graph;
            self.reset_view(elapsed);
        }
    }

    fn update_graph(&mut self, input: &dyn InputService, audio: &mut dyn AudioService, elapsed: Duration) {
        if input.cancel_press() {
            self.state = WindowState::CharacterSelect;
            return;
        }

        self.update_view(true, false, elapsed);

        if input.confirm_press() {
            self.handle_purchase(audio);
        }

        let Some(current) = self.selected_node else {
            return;
        };
        if let Some(next) = navigate(&self.graph, current, &self.displayed_nodes, Direction::from_input(input)) {
            debug!(target: "skill_graph", "Selection moved from node {} to node {}", current, next);
            self.selected_node = Some(next);
            self.refresh_bottom_info();
        }
    }

    //--- Drawing ----------------------------------------------------------

    pub fn draw(&self, video: &mut dyn VideoService) {
        video.draw_rect(self.frame_rect(), WINDOW_BACKGROUND);

        match self.state {
            WindowState::None => {}
            WindowState::CharacterSelect => self.draw_character_select(video),
            WindowState::Graph => self.draw_graph(video),
        }
    }

    pub fn draw_bottom_window(&self, video: &mut dyn VideoService) {
        match self.state {
            WindowState::None => {}
            WindowState::CharacterSelect => video.draw_text("Choose a character.", BOTTOM_MENU_POSITION),
            WindowState::Graph => {
                let Some(info) = self.bottom_info else {
                    return;
                };
                let line = |n: f32| Position2D::new(BOTTOM_MENU_POSITION.x, BOTTOM_MENU_POSITION.y + n * BOTTOM_LINE_HEIGHT);
                video.draw_text(&format!("Experience needed: {}", info.experience_needed), line(0.0));
                video.draw_text(&format!("Unspent experience: {}", info.unspent_experience), line(1.0));
                if info.obtained {
                    video.draw_text("Obtained", line(2.0));
                }
            }
        }
    }

    fn draw_character_select(&self, video: &mut dyn VideoService) {
        for (row, member) in self.party.members().iter().enumerate() {
            let at = Position2D::new(
                CHAR_SELECT_POSITION.x,
                CHAR_SELECT_POSITION.y + row as f32 * CHAR_SELECT_ROW_HEIGHT,
            );
            video.draw_text(member.name(), at);
            if row == self.char_selection {
                video.draw_image(CURSOR_IMAGE, Position2D::new(at.x - 50.0, at.y - 6.0), POINTER_WIDTH);
            }
        }
    }

    fn draw_graph(&self, video: &mut dyn VideoService) {
        video.push_scissor(self.graph_area());

        for line in &self.links {
            video.draw_line(line.begin, line.end, 7.0, GRAYED_PATH);
        }
        for line in &self.colored_links {
            video.draw_line(line.begin, line.end, 10.0, NODE_BLUE);
        }

        let character_icon = self.selected_character().map(|character| character.icon());
        let mut pointer = None;

        for node in self.displayed_nodes.iter().filter_map(|&id| self.graph.node(id)) {
            let center = self.to_screen(node.position());
            let half = NODE_ICON_WIDTH / 2.0;
            video.draw_image(node.icon(), Position2D::new(center.x - half, center.y - half), NODE_ICON_WIDTH);

            if self.selected_node == Some(node.id()) {
                pointer = Some(Position2D::new(
                    center.x - POINTER_WIDTH / 3.0,
                    center.y - NODE_ICON_WIDTH - POINTER_HEIGHT,
                ));
            }

            if self.character_node != Some(node.id()) {
                continue;
            }
            if let Some(icon) = character_icon {
                let half = CHARACTER_ICON_WIDTH / 2.0;
                video.draw_image(icon, Position2D::new(center.x - half, center.y - half), CHARACTER_ICON_WIDTH);
            }
        }

        if let Some(at) = pointer {
            video.draw_image(POINTER_IMAGE, at, POINTER_WIDTH);
        }

        video.pop_scissor();
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn selected_character(&self) -> Option<&SkillCharacter> {
        self.selected_character.and_then(|index| self.party.get(index))
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.selected_node
    }

    /// Node the selected character stands on.
    pub fn character_node(&self) -> Option<NodeId> {
        self.character_node
    }

    /// Graph position the view is centered on, if any.
    pub fn current_offset(&self) -> Option<Position2D> {
        self.current_offset
    }

    pub fn view_position(&self) -> Position2D {
        self.view_position
    }

    pub fn displayed_nodes(&self) -> &[NodeId] {
        &self.displayed_nodes
    }

    pub fn links(&self) -> &[NodeLine] {
        &self.links
    }

    pub fn colored_links(&self) -> &[NodeLine] {
        &self.colored_links
    }

    pub fn bottom_info(&self) -> Option<BottomInfo> {
        self.bottom_info
    }

    pub fn last_purchase(&self) -> Option<PurchaseOutcome> {
        self.last_purchase
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    //--- Internal Helpers -------------------------------------------------

    fn select_character(&mut self) -> bool {
        let Some(character) = self.party.get(self.char_selection) else {
            self.selected_character = None;
            self.selected_node = Some(0);
            return false;
        };

        let location = character.location();
        self.selected_character = Some(self.char_selection);
        self.selected_node = Some(location);
        self.character_node = Some(location);
        true
    }

    fn reset_view(&mut self, elapsed: Duration) {
        let has_selected = self.selected_node.and_then(|id| self.graph.node(id)).is_some();
        if !has_selected {
            self.selected_node = Some(0);
        }

        if self.graph.node(0).is_none() && !has_selected {
            self.current_offset = None;
            self.selected_node = None;
            self.displayed_nodes.clear();
            self.links.clear();
            self.colored_links.clear();
            warn!(target: "skill_graph", "Empty skill graph view");
            return;
        }

        self.update_view(false, false, elapsed);
        self.refresh_bottom_info();
    }

    fn update_view(&mut self, scroll: bool, force: bool, elapsed: Duration) {
        let Some(offset) = self.selected_node.and_then(|id| self.graph.node(id)).map(SkillNode::position) else {
            return;
        };
        self.current_offset = Some(offset);

        let target = Position2D::new(
            self.position.x + SKILL_GRAPH_AREA_WIDTH / 2.0 + WINDOW_BORDER_WIDTH - offset.x,
            self.position.y + SKILL_GRAPH_AREA_HEIGHT / 2.0 + WINDOW_BORDER_WIDTH - offset.y,
        );

        if self.view_position == target && !force {
            return;
        }

        let mut distance = Position2D::new(target.x - self.view_position.x, target.y - self.view_position.y);
        if scroll {
            self.view_position = Position2D::new(
                lerp(self.view_position.x, target.x, VIEW_SCROLL_FACTOR),
                lerp(self.view_position.y, target.y, VIEW_SCROLL_FACTOR),
            );
            if self.view_position.distance2(&target) < VIEW_SNAP_DISTANCE * VIEW_SNAP_DISTANCE {
                self.view_position = target;
            }
        } else {
            self.view_position = target;
            distance = Position2D::default();
        }

        let half_width = SKILL_GRAPH_AREA_WIDTH / 2.0 + NODES_DISPLAY_MARGIN;
        let half_height = SKILL_GRAPH_AREA_HEIGHT / 2.0 + NODES_DISPLAY_MARGIN;
        let visible = Rect2D::new(
            offset.x - half_width + distance.x,
            offset.x + half_width + distance.x,
            offset.y - half_height + distance.y,
            offset.y + half_height + distance.y,
        );

        self.refresh_timer += elapsed;
        if self.view_position == target || self.refresh_timer >= VISIBLE_REFRESH_INTERVAL {
            self.refresh_timer = Duration::ZERO;
            self.displayed_nodes = self
                .graph
                .nodes()
                .iter()
                .filter(|node| visible.contains(node.position()))
                .map(SkillNode::id)
                .collect();
        }

        self.rebuild_links();
    }

    fn rebuild_links(&mut self) {
        self.links.clear();
        self.colored_links.clear();

        let character = self.selected_character.and_then(|index| self.party.get(index));

        for node in self.displayed_nodes.iter().filter_map(|&id| self.graph.node(id)) {
            let begin = self.to_screen(node.position());
            for linked in node.children().iter().filter_map(|&id| self.graph.node(id)) {
                let line = NodeLine {
                    begin,
                    end: self.to_screen(linked.position()),
                };

                let both_obtained = character
                    .is_some_and(|character| character.is_obtained(node.id()) && character.is_obtained(linked.id()));
                if both_obtained {
                    self.colored_links.push(line);
                }
                self.links.push(line);
            }
        }
    }

    fn handle_purchase(&mut self, audio: &mut dyn AudioService) {
        let Some(outcome) = self.try_purchase() else {
            return;
        };
        self.last_purchase = Some(outcome);

        match outcome {
            PurchaseOutcome::Rejected(reason) => {
                debug!(target: "skill_graph", "Purchase rejected: {:?}", reason);
                audio.play_sound(SOUND_BUMP);
            }
            PurchaseOutcome::Obtained(node) => {
                audio.play_sound(SOUND_CONFIRM);
                self.character_node = Some(node);
                self.update_view(true, true, Duration::ZERO);
                self.refresh_bottom_info();
            }
        }
    }

    fn try_purchase(&mut self) -> Option<PurchaseOutcome> {
        let character_index = self.selected_character?;
        let node = self.graph.node(self.selected_node?)?;
        let character = self.party.get_mut(character_index)?;

        if let Err(reason) = check_purchase(node, character, &self.inventory) {
            return Some(PurchaseOutcome::Rejected(reason));
        }

        for &(item, needed) in node.items_needed() {
            if !self.inventory.remove(item, needed) {
                let held = self.inventory.count(item).unwrap_or(0);
                warn!(target: "skill_graph", "Item {} vanished during purchase of node {}", item, node.id());
                return Some(PurchaseOutcome::Rejected(RejectReason::NotEnoughItems { item, needed, held }));
            }
        }
        character.obtain(node.id(), node.experience_needed());
        Some(PurchaseOutcome::Obtained(node.id()))
    }

    fn refresh_bottom_info(&mut self) {
        let info = self
            .selected_node
            .and_then(|id| self.graph.node(id))
            .zip(self.selected_character())
            .map(|(node, character)| BottomInfo {
                node: node.id(),
                experience_needed: node.experience_needed(),
                unspent_experience: character.unspent_experience(),
                obtained: character.is_obtained(node.id()),
            });
        self.bottom_info = info;
    }

    fn to_screen(&self, position: Position2D) -> Position2D {
        Position2D::new(position.x + self.view_position.x, position.y + self.view_position.y)
    }

    fn graph_area(&self) -> Rect2D {
        Rect2D::from_origin(
            self.position.x + WINDOW_BORDER_WIDTH,
            self.position.y + WINDOW_BORDER_WIDTH,
            SKILL_GRAPH_AREA_WIDTH,
            SKILL_GRAPH_AREA_HEIGHT,
        )
    }

    fn frame_rect(&self) -> Rect2D {
        Rect2D::from_origin(
            self.position.x,
            self.position.y,
            SKILL_GRAPH_AREA_WIDTH + 2.0 * WINDOW_BORDER_WIDTH,
            SKILL_GRAPH_AREA_HEIGHT + 2.0 * WINDOW_BORDER_WIDTH,
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
