extern crate search_agents;

use search_agents::adversarial::{AdversarialAgent, Strategy};
use search_agents::evaluation::EvaluationFunction;
use search_agents::random::SeededGenerator;
use search_agents::search::{GraphSearch, SearchAlgorithm};
use search_agents::worlds::chase::{ChaseState, play_episode};
use search_agents::worlds::layout::Layout;
use search_agents::worlds::maze::{GridHeuristic, PositionSearchProblem};

const MAZE: &str = "\
%%%%%%%%%%%%%%%%%%%%
%P     %           %
% %%%% % %%%%%%%%% %
% %    %         % %
% % %%%%%%%%%%% %% %
% %           %    %
% %%%%%%%%%%% % %%%%
%           %     .%
%%%%%%%%%%%%%%%%%%%%";

const CHASE: &str = "\
%%%%%%%%%%
%P  .  o %
% %%%%%% %
% .    . %
% %%%%%% %
%   .  G %
%%%%%%%%%%";

fn main() {
    // Walk the maze with every search algorithm
    let layout: Layout = match MAZE.parse() {
        Ok(layout) => layout,
        Err(error) => {
            println!("Invalid maze: {error}");
            return;
        }
    };
    let Some(problem) = PositionSearchProblem::to_food(&layout) else {
        println!("The maze needs exactly one food pellet");
        return;
    };

    for algorithm in SearchAlgorithm::ALL {
        let search = GraphSearch::builder(algorithm)
            .with_heuristic(GridHeuristic::Manhattan)
            .build();
        match search.solve(&problem) {
            Ok(solution) => println!(
                "{algorithm:>6}: {} steps, cost {:.1}, {} expanded",
                solution.actions.len(),
                solution.cost,
                solution.stats.expanded
            ),
            Err(error) => println!("{algorithm:>6}: {error}"),
        }
    }

    // Play one chase against a randomly moving ghost
    let state: ChaseState = match CHASE.parse() {
        Ok(state) => state,
        Err(error) => {
            println!("Invalid chase layout: {error}");
            return;
        }
    };
    let evaluation: EvaluationFunction = match "betterEvaluationFunction".parse() {
        Ok(evaluation) => evaluation,
        Err(error) => {
            println!("{error}");
            return;
        }
    };
    let agent = AdversarialAgent::builder(Strategy::AlphaBeta)
        .with_depth(2)
        .with_evaluation_function::<ChaseState>(evaluation)
        .build();
    let mut random = SeededGenerator::default();

    match play_episode(state, &agent, &mut random, 200) {
        Ok(episode) => println!(
            "{}: {:?} with score {} after {} moves",
            agent.strategy(),
            episode.outcome,
            episode.score,
            episode.moves
        ),
        Err(error) => println!("Episode failed: {error}"),
    }
}
